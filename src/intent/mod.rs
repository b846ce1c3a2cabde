//! # Intent factory
//!
//! Turns one raw line of player text into a structured [`Intent`]: a
//! tokenized, quote-aware, option-parsed view of the line plus the
//! identifiers (actor, location, session) that give it a home in the
//! world. Construction is the only place these identifiers are validated —
//! once an `Intent` exists, every field on it is trusted.

pub mod tokenizer;

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::Timestamp;
use crate::urn::{ActorUrn, PlaceUrn, SessionUrn, UrnError};
use tokenizer::{filter_tokens, tokenize, RawToken};

lazy_static! {
    static ref BASE62_RE: Regex = Regex::new(r"^[0-9A-Za-z]+$").unwrap();
    static ref OPTION_RE: Regex = Regex::new(r"^--([^=]+)=(.*)$").unwrap();
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("ts must be a finite number")]
    InvalidTimestamp,
    #[error("id {0:?} is not a valid base62 identifier")]
    InvalidId(String),
    #[error("invalid actor urn: {0}")]
    InvalidActorUrn(#[source] UrnError),
    #[error("invalid location urn: {0}")]
    InvalidLocationUrn(#[source] UrnError),
    #[error("invalid session urn: {0}")]
    InvalidSessionUrn(#[source] UrnError),
}

/// An `--opt=value` or `--flag` option value. Modeled as a tagged union
/// rather than a dynamic string-or-bool map so handlers read it through
/// narrow accessors instead of type-testing at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionValue {
    Text(String),
    Flag,
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            OptionValue::Flag => None,
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, OptionValue::Flag)
    }
}

/// Inputs to [`Intent::new`]. `id`/`ts` fall back to the injected
/// `uniqid`/`timestamp` sources when absent; `location`/`session` are
/// validated only when present.
pub struct IntentParams<'a> {
    pub id: Option<&'a str>,
    pub ts: Option<f64>,
    pub actor: &'a str,
    pub location: Option<&'a str>,
    pub session: Option<&'a str>,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub ts: Timestamp,
    pub actor: ActorUrn,
    pub location: Option<PlaceUrn>,
    pub session: Option<SessionUrn>,
    pub text: String,
    pub normalized: String,
    pub verb: String,
    pub tokens: Vec<String>,
    pub uniques: HashSet<String>,
    pub options: std::collections::HashMap<String, OptionValue>,
}

impl Intent {
    /// Builds an `Intent` from raw player input. `uniqid`/`timestamp` are
    /// only consulted when `params.id`/`params.ts` are absent.
    pub fn new(
        params: IntentParams,
        uniqid: impl FnOnce() -> String,
        timestamp: impl FnOnce() -> Timestamp,
    ) -> Result<Self, IntentError> {
        if let Some(ts) = params.ts {
            if !Timestamp::is_finite(ts) {
                return Err(IntentError::InvalidTimestamp);
            }
        }
        if let Some(id) = params.id {
            if !BASE62_RE.is_match(id) {
                return Err(IntentError::InvalidId(id.to_string()));
            }
        }

        let actor = ActorUrn::parse(params.actor).map_err(IntentError::InvalidActorUrn)?;
        let location = params
            .location
            .map(PlaceUrn::parse)
            .transpose()
            .map_err(IntentError::InvalidLocationUrn)?;
        let session = params
            .session
            .map(SessionUrn::parse)
            .transpose()
            .map_err(IntentError::InvalidSessionUrn)?;

        let id = params.id.map(str::to_string).unwrap_or_else(uniqid);
        let ts = match params.ts {
            Some(ts) => Timestamp::from_millis(ts as i64),
            None => timestamp(),
        };

        let text = params.text.trim().to_string();
        let normalized = text.to_lowercase();

        let raw_tokens = filter_tokens(tokenize(&text));
        let (verb, tokens, options) = split_verb_options(raw_tokens);
        let uniques = tokens.iter().cloned().collect::<HashSet<_>>();

        Ok(Intent {
            id,
            ts,
            actor,
            location,
            session,
            text,
            normalized,
            verb,
            tokens,
            uniques,
            options,
        })
    }
}

/// Splits kept tokens into `(verb, tokens, options)`. The first kept token
/// is always the verb; `--k=v`/`--flag` tokens become options; a bare `--`
/// is kept as an argument token, never an option.
fn split_verb_options(
    tokens: Vec<RawToken>,
) -> (String, Vec<String>, std::collections::HashMap<String, OptionValue>) {
    let mut iter = tokens.into_iter();
    let verb = iter.next().map(|t| t.text).unwrap_or_default();

    let mut args = Vec::new();
    let mut options = std::collections::HashMap::new();

    for token in iter {
        let text = &token.text;
        if text.starts_with("--") && text.len() > 2 {
            if let Some(caps) = OPTION_RE.captures(text) {
                let name = caps.get(1).unwrap().as_str().to_string();
                let mut value = caps.get(2).unwrap().as_str().to_string();
                value = strip_matching_outer_quotes(&value);
                options.insert(name, OptionValue::Text(value));
            } else {
                let name = text[2..].to_string();
                options.insert(name, OptionValue::Flag);
            }
        } else {
            args.push(token.text);
        }
    }

    (verb, args, options)
}

fn strip_matching_outer_quotes(value: &str) -> String {
    let mut chars = value.chars();
    if let (Some(first), Some(last)) = (chars.next(), value.chars().last()) {
        if value.chars().count() >= 2 && first == last && (first == '"' || first == '\'') {
            return value[first.len_utf8()..value.len() - last.len_utf8()].to_string();
        }
    }
    value.to_string()
}


#[cfg(test)]
mod proptest_invariants {
    use super::*;
    use proptest::prelude::*;

    /// A kept-able word: either a length>=2 lowercase alnum run, or a
    /// single ASCII digit (the only length-1 token the filter keeps).
    fn word_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z0-9]{2,8}".prop_map(|s| s),
            "[0-9]".prop_map(|s| s),
        ]
    }

    fn line_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(word_strategy(), 1..8)
    }

    fn build(text: &str) -> Intent {
        Intent::new(
            IntentParams {
                id: None,
                ts: None,
                actor: "flux:actor:test:alice",
                location: Some("flux:place:test:square"),
                session: None,
                text,
            },
            || "propidpropidpropidpropid".to_string(),
            Timestamp::now,
        )
        .unwrap()
    }

    proptest! {
        /// §8: tokens is uniques with duplicates/ordering restored from the
        /// original text, and verb + tokens cover every kept token exactly
        /// once (ordering from the source line).
        #[test]
        fn tokens_and_verb_partition_kept_words(words in line_strategy()) {
            let text = words.join(" ");
            let intent = build(&text);

            let mut expected_tail = words[1..].to_vec();
            prop_assert_eq!(&intent.verb, &words[0]);
            prop_assert_eq!(&intent.tokens, &expected_tail);

            let expected_uniques: std::collections::HashSet<String> =
                expected_tail.drain(..).collect();
            prop_assert_eq!(intent.uniques, expected_uniques);
        }

        /// §8: for all tokens `t`, `|t| = 1 /\ !isDigit(t) => t not in
        /// tokens /\ t != verb`. The generator never produces such a `t`,
        /// so this instead checks the converse holds for every digit we do
        /// generate: single digits survive wherever they land.
        #[test]
        fn single_digit_tokens_survive(words in line_strategy()) {
            let text = words.join(" ");
            let intent = build(&text);
            for (i, w) in words.iter().enumerate() {
                if w.chars().count() == 1 {
                    if i == 0 {
                        prop_assert_eq!(&intent.verb, w);
                    } else {
                        prop_assert!(intent.tokens.contains(w));
                    }
                }
            }
        }

        /// Injecting a lone non-digit letter between kept words must not
        /// surface it anywhere in the intent.
        #[test]
        fn lone_non_digit_letters_are_dropped(words in line_strategy(), letter in "[a-z]") {
            let mut all = vec![letter.clone()];
            all.extend(words.clone());
            let text = all.join(" ");
            let intent = build(&text);

            prop_assert_ne!(&intent.verb, &letter);
            prop_assert!(!intent.tokens.contains(&letter));
        }
    }
}
