//! Crate-level error aggregation.
//!
//! Per-domain errors (URN validation, intent construction, sanitization,
//! handler failures) live next to the code that raises them and are
//! composed here with `#[from]` so callers crossing module boundaries can
//! use `?` without manual mapping. Resolution/dispatch failures (soft
//! errors: `INVALID_SYNTAX`, `INVALID_ACTION`) are *not* part of this enum —
//! those never bubble as `Result::Err`, they are appended to a context's
//! error channel via [`crate::context::TransformerContext::declare_error`].

use thiserror::Error;

use crate::intent::IntentError;
use crate::sanitize::SanitizeError;
use crate::urn::UrnError;

/// Soft error code declared on a context when no parser claims an intent.
pub const INVALID_SYNTAX: &str = "INVALID_SYNTAX";
/// Soft error code declared on a context when a command's type has no
/// registered handler.
pub const INVALID_ACTION: &str = "INVALID_ACTION";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Urn(#[from] UrnError),
    #[error(transparent)]
    Intent(#[from] IntentError),
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
}

pub type Result<T> = std::result::Result<T, Error>;
