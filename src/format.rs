//! Positional placeholder formatting
//!
//! Templates use composite format items: `{0}`, `{1,8}` (right aligned in
//! eight columns), `{1,-8}` (left aligned) and `{0:N2}`. The format component
//! after `:` is accepted and ignored. `{{` and `}}` produce literal braces.

use std::fmt::Display;

use thiserror::Error;

/// Widest alignment a placeholder may request.
const MAX_ALIGNMENT: u32 = 1_000_000;

/// Reasons a template could not be formatted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// `{` without a matching `}`
    #[error("Unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),
    /// `}` that neither closes a placeholder nor is doubled
    #[error("Unexpected '}}' at byte {0}")]
    UnmatchedClosingBrace(usize),
    /// Placeholder whose index or alignment is not a usable number
    #[error("Invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),
    /// Placeholder index with no matching argument
    #[error("Placeholder index {index} is out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Replaces `{n}` placeholders in `template` with `args[n]`.
///
/// Arguments that no placeholder refers to are ignored.
///
/// # Errors
/// See [`FormatError`].
///
/// # Examples
/// ```
/// use json_localizer::format::format_positional;
///
/// let text = format_positional("Hello, {0}! You have {1} new messages.", &[&"Ada", &3]);
/// assert_eq!(text.as_deref(), Ok("Hello, Ada! You have 3 new messages."));
/// ```
pub fn format_positional(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    output.push('{');
                    continue;
                }

                let mut item = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    item.push(next);
                }
                if !closed {
                    return Err(FormatError::UnclosedPlaceholder(position));
                }

                write_item(&mut output, &item, args)?;
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(FormatError::UnmatchedClosingBrace(position));
                }
                output.push('}');
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

/// Renders one `index[,alignment][:format]` item into `output`.
fn write_item(output: &mut String, item: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
    let invalid = || FormatError::InvalidPlaceholder(item.to_string());

    let (head, format) = item.split_once(':').unwrap_or((item, ""));
    let (index, alignment) =
        head.split_once(',').map_or((head, None), |(index, alignment)| (index, Some(alignment)));

    let index: usize = index.trim_end().parse().map_err(|_| invalid())?;
    let alignment: i32 = alignment.map_or(Ok(0), |a| a.trim().parse()).map_err(|_| invalid())?;

    let arg = args
        .get(index)
        .ok_or(FormatError::IndexOutOfRange { index, count: args.len() })?;

    if !format.is_empty() {
        tracing::trace!(format, index, "Ignoring format component of placeholder");
    }

    if alignment.unsigned_abs() > MAX_ALIGNMENT {
        return Err(invalid());
    }

    let rendered = arg.to_string();
    let width = usize::try_from(alignment.unsigned_abs()).map_err(|_| invalid())?;
    if alignment < 0 {
        output.push_str(&format!("{rendered:<width$}"));
    } else {
        output.push_str(&format!("{rendered:>width$}"));
    }

    Ok(())
}
