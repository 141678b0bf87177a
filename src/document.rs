//! Translation document tree
//!
//! One document per culture. Objects nest further named nodes, strings are
//! the only leaves that can be rendered as text.

use std::collections::BTreeMap;

use jsonc_parser::ParseOptions;
use serde_json::Value;
use thiserror::Error;

/// Separator between path segments of a translation key.
pub const KEY_SEPARATOR: char = '.';

/// Errors produced while turning raw file contents into a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The text is not valid JSON (comments and trailing commas allowed).
    #[error("Failed to parse JSON: {0}")]
    Syntax(String),
    /// The text contains no value at all.
    #[error("Document is empty")]
    Empty,
    /// The top-level value is not an object.
    #[error("Document root must be an object, found {0}")]
    InvalidRoot(&'static str),
}

/// A node of a translation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// Named children, in document order.
    Object(Vec<(String, TranslationNode)>),
    /// A string leaf.
    Text(String),
    /// Numbers, booleans, null and arrays. Present but not textual.
    Other,
}

impl TranslationNode {
    /// Finds a direct child by name.
    ///
    /// An exact match wins; otherwise the first child whose name is equal
    /// ignoring case is returned.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        let Self::Object(children) = self else {
            return None;
        };

        children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .or_else(|| children.iter().find(|(child_name, _)| eq_ignore_case(child_name, name)))
            .map(|(_, node)| node)
    }

    /// Returns the text of a string leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Object(_) | Self::Other => None,
        }
    }
}

impl From<Value> for TranslationNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(name, child)| (name, child.into())).collect())
            }
            Value::String(text) => Self::Text(text),
            Value::Array(_) | Value::Number(_) | Value::Bool(_) | Value::Null => Self::Other,
        }
    }
}

/// Parsed contents of a single translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDocument {
    /// Always a [`TranslationNode::Object`].
    root: TranslationNode,
}

impl TranslationDocument {
    /// Parses JSON text into a document.
    ///
    /// Line and block comments and trailing commas are accepted.
    ///
    /// # Errors
    /// - Syntax errors
    /// - Empty input
    /// - A root value that is not an object
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let options = ParseOptions {
            allow_comments: true,
            allow_trailing_commas: true,
            allow_loose_object_property_names: false,
            ..ParseOptions::default()
        };

        let value = jsonc_parser::parse_to_serde_value(text, &options)
            .map_err(|e| DocumentError::Syntax(e.to_string()))?
            .ok_or(DocumentError::Empty)?;

        if !value.is_object() {
            return Err(DocumentError::InvalidRoot(value_kind(&value)));
        }

        Ok(Self { root: value.into() })
    }

    #[must_use]
    pub const fn root(&self) -> &TranslationNode {
        &self.root
    }

    /// Walks the tree one segment at a time.
    ///
    /// Returns `None` as soon as a segment is missing at any depth.
    #[must_use]
    pub fn find<'a, I>(&self, segments: I) -> Option<&TranslationNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments.into_iter().try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Resolves a dotted key such as `common.buttons.save`.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&TranslationNode> {
        self.find(key.split(KEY_SEPARATOR))
    }

    /// Flattens every string leaf into a `dotted.key -> text` map.
    ///
    /// Non-textual leaves are left out.
    #[must_use]
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        flatten_node(&self.root, None, &mut result);
        result
    }
}

/// Recursive step of [`TranslationDocument::flatten`].
fn flatten_node(
    node: &TranslationNode,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    match node {
        TranslationNode::Object(children) => {
            for (name, child) in children {
                let full_key = prefix
                    .map_or_else(|| name.clone(), |p| format!("{p}{KEY_SEPARATOR}{name}"));
                flatten_node(child, Some(&full_key), result);
            }
        }
        TranslationNode::Text(text) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), text.clone());
            }
        }
        TranslationNode::Other => {}
    }
}

/// Unicode-aware case-insensitive comparison without allocating.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
        || a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}

/// Name of a JSON value kind for error messages.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[googletest::test]
    fn parse_accepts_comments_and_trailing_commas() {
        let text = r#"{
  // greeting shown on the landing page
  "home": {
    "title": "Welcome", /* inline */
  },
}"#;

        let doc = TranslationDocument::parse(text).unwrap();

        expect_that!(
            doc.resolve("home.title").and_then(TranslationNode::as_text),
            some(eq("Welcome"))
        );
    }

    #[rstest]
    #[case("", DocumentError::Empty)]
    #[case("   // nothing here", DocumentError::Empty)]
    #[case("[\"a\"]", DocumentError::InvalidRoot("array"))]
    #[case("\"text\"", DocumentError::InvalidRoot("string"))]
    fn parse_rejects_unusable_documents(#[case] text: &str, #[case] expected: DocumentError) {
        assert_eq!(TranslationDocument::parse(text), Err(expected));
    }

    #[googletest::test]
    fn parse_reports_syntax_errors() {
        let result = TranslationDocument::parse(r#"{"a": "#);

        assert!(matches!(result, Err(DocumentError::Syntax(_))));
    }

    #[rstest]
    #[case("Title")]
    #[case("TITLE")]
    #[case("title")]
    fn child_lookup_ignores_case(#[case] segment: &str) {
        let doc = TranslationDocument::parse(r#"{"page": {"title": "Hello"}}"#).unwrap();

        let node = doc.find(["PAGE", segment]);

        assert_eq!(node.and_then(TranslationNode::as_text), Some("Hello"));
    }

    #[googletest::test]
    fn child_lookup_prefers_exact_match() {
        let doc = TranslationDocument::parse(r#"{"Key": "upper", "key": "lower"}"#).unwrap();

        expect_that!(doc.resolve("key").and_then(TranslationNode::as_text), some(eq("lower")));
        expect_that!(doc.resolve("Key").and_then(TranslationNode::as_text), some(eq("upper")));
    }

    #[googletest::test]
    fn child_lookup_takes_first_case_insensitive_match_in_document_order() {
        let doc =
            TranslationDocument::parse(r#"{"kEY": "first in document", "KEY": "second"}"#)
                .unwrap();

        expect_that!(
            doc.resolve("key").and_then(TranslationNode::as_text),
            some(eq("first in document"))
        );
        expect_that!(doc.resolve("KEY").and_then(TranslationNode::as_text), some(eq("second")));
    }

    #[googletest::test]
    fn children_keep_document_order() {
        let doc = TranslationDocument::parse(r#"{"zeta": "z", "alpha": "a", "mid": "m"}"#).unwrap();

        let TranslationNode::Object(children) = doc.root() else {
            panic!("root is always an object");
        };
        let names: Vec<&str> = children.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[googletest::test]
    fn child_lookup_handles_non_ascii_names() {
        let doc = TranslationDocument::parse(r#"{"Ärger": "trouble"}"#).unwrap();

        expect_that!(doc.resolve("ärger").and_then(TranslationNode::as_text), some(eq("trouble")));
    }

    #[googletest::test]
    fn resolve_stops_at_missing_segment() {
        let doc = TranslationDocument::parse(r#"{"a": {"b": "leaf"}}"#).unwrap();

        expect_that!(doc.resolve("a.b.c"), none());
        expect_that!(doc.resolve("a.x"), none());
        expect_that!(doc.resolve("x"), none());
    }

    #[googletest::test]
    fn non_textual_values_become_other() {
        let doc =
            TranslationDocument::parse(r#"{"n": 1, "b": true, "z": null, "list": ["a"]}"#).unwrap();

        for key in ["n", "b", "z", "list"] {
            expect_that!(doc.resolve(key), some(eq(&TranslationNode::Other)));
        }
        expect_that!(doc.resolve("list.0"), none());
    }

    #[googletest::test]
    fn flatten_collects_only_string_leaves() {
        let doc = TranslationDocument::parse(
            r#"{
  "common": { "hello": "Hello", "goodbye": "Goodbye" },
  "errors": { "notFound": "Not found", "code": 404 },
  "top": "Top"
}"#,
        )
        .unwrap();

        let flat = doc.flatten();

        expect_that!(flat.get("common.hello"), some(eq(&"Hello".to_string())));
        expect_that!(flat.get("common.goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(flat.get("errors.notFound"), some(eq(&"Not found".to_string())));
        expect_that!(flat.get("top"), some(eq(&"Top".to_string())));
        expect_that!(flat.contains_key("errors.code"), eq(false));
        expect_that!(flat.len(), eq(4));
    }
}
