//! Quote-aware lexer over a single line of player text.
//!
//! A single pass over the input's characters, tracked in parallel with its
//! lowercased form, so that the emitted token can be either the normalized
//! or the original-case buffer depending on whether a quote was opened
//! anywhere inside it. This mirrors the teacher's
//! `tokenizer::token::Tokenizer` in spirit (a small state machine emitting a
//! `Vec` of spans) but the state machine itself is purpose-built for free
//! text rather than a keyword/operator grammar.

/// A single emitted token, along with whether it was produced from a
/// quoted span (which determines whether its case was preserved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub quoted: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InQuote(char),
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn flush_token(
    normalized: &mut String,
    original: &mut String,
    quoted: &mut bool,
    tokens: &mut Vec<RawToken>,
) {
    if !normalized.is_empty() {
        let text = if *quoted {
            original.clone()
        } else {
            normalized.clone()
        };
        tokens.push(RawToken { text, quoted: *quoted });
    }
    normalized.clear();
    original.clear();
    *quoted = false;
}

/// Splits `text` into raw tokens. Whitespace outside quotes delimits;
/// whitespace inside quotes does not. Quote characters are pushed into the
/// token buffer like any other character — stripping happens later, only
/// for option values whose outer quotes match (see
/// [`crate::intent::split_verb_options`]).
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut normalized = String::new();
    let mut original = String::new();
    let mut token_was_quoted = false;
    let mut mode = Mode::Normal;

    for ch in text.chars() {
        let lower: String = ch.to_lowercase().collect();
        let lower_char = lower.chars().next().unwrap_or(ch);

        match mode {
            Mode::Normal => {
                if ch == '"' || ch == '\'' {
                    mode = Mode::InQuote(ch);
                    token_was_quoted = true;
                    normalized.push(lower_char);
                    original.push(ch);
                } else if is_delimiter(ch) {
                    flush_token(&mut normalized, &mut original, &mut token_was_quoted, &mut tokens);
                } else {
                    normalized.push(lower_char);
                    original.push(ch);
                }
            }
            Mode::InQuote(open) => {
                normalized.push(lower_char);
                original.push(ch);
                if ch == open {
                    mode = Mode::Normal;
                }
            }
        }
    }
    flush_token(&mut normalized, &mut original, &mut token_was_quoted, &mut tokens);

    tokens
}

/// Drops tokens of length 0 (never produced by `tokenize`, kept for
/// clarity) and tokens of length 1 unless that single byte is an ASCII
/// digit.
pub fn filter_tokens(tokens: Vec<RawToken>) -> Vec<RawToken> {
    tokens
        .into_iter()
        .filter(|t| {
            let len = t.text.chars().count();
            len >= 2 || (len == 1 && t.text.chars().next().is_some_and(|c| c.is_ascii_digit()))
        })
        .collect()
}
