//! Quote-aware argument splitting.
//!
//! Whitespace separates tokens except inside a pair of matching `"` or `'`
//! quotes. Quotes are stripped, and quoted text glued to unquoted text stays
//! in the same token, so `a"b c"` is the single token `ab c`.
//!
//! Backslash follows shell rules: outside quotes it escapes any character,
//! inside double quotes only `"` and `\`, and inside single quotes nothing.

use std::num::IntErrorKind;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No closing quotation")]
    UnclosedQuote,

    #[error("No escaped character")]
    TrailingEscape,

    #[error("Invalid task ID: '{0}'. Must be an integer.")]
    InvalidId(String),

    /// An integer id that does not fit in `i64`.
    #[error("Task ID out of range: {text}")]
    IdOutOfRange { text: String, negative: bool },
}

pub fn split_args(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Set once a token has started, so `""` still yields an empty token.
    let mut in_token = false;
    let mut quote: Option<char> = None;

    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some('"') if ch == '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => return Err(ParseError::UnclosedQuote),
            },
            Some(_) => current.push(ch),
            None if ch == '\\' => {
                current.push(chars.next().ok_or(ParseError::TrailingEscape)?);
                in_token = true;
            }
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnclosedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

pub fn parse_id(text: &str) -> Result<i64, ParseError> {
    let text = text.trim();
    text.parse().map_err(|err: std::num::ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::IdOutOfRange {
            text: text.to_string(),
            negative: *err.kind() == IntErrorKind::NegOverflow,
        },
        _ => ParseError::InvalidId(text.to_string()),
    })
}
