//! Culture identifiers and the fallback chain
//!
//! A culture identifier is an opaque string such as `en-US` or `pt`. It is
//! only interpreted far enough to find its primary subtag.

/// Culture used when neither the requested culture nor its primary subtag
/// has a translation document.
pub const DEFAULT_FALLBACK_CULTURE: &str = "en";

/// Separator between subtags of a culture identifier.
const SUBTAG_SEPARATOR: char = '-';

/// Highest `q` weight, expressed in thousandths.
const MAX_QUALITY: u16 = 1000;

/// Returns the primary subtag (text before the first `-`).
///
/// # Examples
/// ```
/// use json_localizer::culture::primary_subtag;
///
/// assert_eq!(primary_subtag("pt-BR"), "pt");
/// assert_eq!(primary_subtag("sr-Cyrl-RS"), "sr");
/// assert_eq!(primary_subtag("fr"), "fr");
/// ```
#[must_use]
pub fn primary_subtag(culture: &str) -> &str {
    culture.split_once(SUBTAG_SEPARATOR).map_or(culture, |(primary, _)| primary)
}

/// Builds the ordered list of cultures to try for `culture`.
///
/// The order is: the culture as given, its primary subtag, then `fallback`.
/// Repeated entries are dropped, so `en` with fallback `en` yields `["en"]`.
#[must_use]
pub fn fallback_chain<'a>(culture: &'a str, fallback: &'a str) -> Vec<&'a str> {
    let mut chain = Vec::with_capacity(3);
    for candidate in [culture, primary_subtag(culture), fallback] {
        if !chain.contains(&candidate) {
            chain.push(candidate);
        }
    }
    chain
}

/// Picks the preferred culture from an `Accept-Language` header value.
///
/// The language range with the highest `q` weight wins; ranges with equal
/// weight keep header order. Wildcards, `q=0` entries and entries with an
/// unparseable weight are ignored.
///
/// # Examples
/// ```
/// use json_localizer::culture::culture_from_accept_language;
///
/// let culture = culture_from_accept_language("fr;q=0.8, pt-BR, en;q=0.5");
/// assert_eq!(culture.as_deref(), Some("pt-BR"));
/// assert_eq!(culture_from_accept_language("*"), None);
/// ```
#[must_use]
pub fn culture_from_accept_language(header: &str) -> Option<String> {
    let mut best: Option<(&str, u16)> = None;

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let range = parts.next().map(str::trim).unwrap_or_default();
        if range.is_empty() || range == "*" {
            continue;
        }

        let quality = parts
            .map(str::trim)
            .find_map(|param| {
                param
                    .strip_prefix("q=")
                    .or_else(|| param.strip_prefix("Q="))
                    .map(parse_quality)
            })
            .unwrap_or(Some(MAX_QUALITY));

        let Some(quality) = quality.filter(|q| *q > 0) else {
            continue;
        };

        if best.is_none_or(|(_, best_quality)| quality > best_quality) {
            best = Some((range, quality));
        }
    }

    best.map(|(range, _)| range.to_string())
}

/// Parses a `q` weight (`0`, `0.5`, `1.000`, ...) into thousandths.
fn parse_quality(value: &str) -> Option<u16> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match whole {
        "1" => fraction.bytes().all(|b| b == b'0').then_some(MAX_QUALITY),
        "0" => {
            let digits = format!("{fraction:0<3}");
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Normalizes an operating-system locale name into a culture identifier.
///
/// `pt_BR.UTF-8` becomes `pt-BR`; the POSIX `C` locale yields `None`.
fn normalize_system_locale(locale: &str) -> Option<String> {
    let name = locale.split(['.', '@']).next().unwrap_or_default().trim();
    if name.is_empty() || name.eq_ignore_ascii_case("c") || name.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(name.replace('_', "-"))
}

/// Culture of the running process, taken from the operating system locale.
#[must_use]
pub fn ambient_culture() -> Option<String> {
    let locale = sys_locale::get_locale()?;
    let culture = normalize_system_locale(&locale);
    tracing::debug!(?locale, ?culture, "Detected ambient culture");
    culture
}
