//! # Sanitizer
//!
//! Cleans human-supplied free text (shell names, party names) down to a
//! conservative character set before it's allowed to sit anywhere near
//! narrative templates or storage.

use thiserror::Error;

use crate::config::SanitizerConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("input is not a string")]
    NotAString,
    #[error("input sanitizes to an empty string")]
    Empty,
    #[error("input exceeds the maximum length of {max} characters")]
    TooLong { max: usize },
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || matches!(c as u32, 192..=255)
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for c in s.chars() {
        if c == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

/// Sanitizes `input` against the default [`SanitizerConfig`].
pub fn sanitize(input: &str) -> Result<String, SanitizeError> {
    sanitize_with(input, &SanitizerConfig::default())
}

pub fn sanitize_with(input: &str, config: &SanitizerConfig) -> Result<String, SanitizeError> {
    let filtered: String = input.chars().filter(|c| is_allowed(*c)).collect();
    let trimmed = collapse_spaces(&filtered).trim().to_string();

    if trimmed.is_empty() {
        return Err(SanitizeError::Empty);
    }
    if trimmed.chars().count() > config.max_len {
        return Err(SanitizeError::TooLong { max: config.max_len });
    }
    Ok(trimmed)
}

/// Sanitizes a dynamically-typed payload value (e.g. a field pulled out of
/// a [`crate::command::Command`] payload), surfacing [`SanitizeError::NotAString`]
/// when it isn't textual.
pub fn sanitize_value(value: &serde_json::Value) -> Result<String, SanitizeError> {
    let s = value.as_str().ok_or(SanitizeError::NotAString)?;
    sanitize(s)
}
