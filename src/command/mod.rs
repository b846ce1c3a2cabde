//! # Command
//!
//! The typed, handler-validated action produced by [`crate::command::resolver::resolve_command_from_intent`]
//! and consumed by [`crate::handler::execute_command`]. `command_type` is
//! deliberately a plain string rather than a closed enum: the catalog of
//! concrete handlers (combat, workbench, party, inventory, currency) is out
//! of scope for this crate, so the set of valid types is open.

pub mod resolver;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::Timestamp;
use crate::urn::{ActorUrn, PlaceUrn, SessionUrn};

/// A handler's declared tag, e.g. `"ATTACK"`, `"LOOK"`, `"ADVANCE"`. Kept as
/// a type alias rather than a newtype so handlers can build one with an
/// ordinary string literal.
pub type CommandType = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub command_type: CommandType,
    pub id: String,
    pub ts: Timestamp,
    pub actor: ActorUrn,
    pub location: Option<PlaceUrn>,
    pub session: Option<SessionUrn>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Raised when a handler's `parse`/`reduce` violates its own contract.
/// `parse` returning `Ok(None)` means "not mine"; this is only for genuine
/// internal invariant violations, which the caller captures into the
/// context's error channel rather than propagating.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandlerError {
    #[error("handler {handler} invariant violated: {message}")]
    InvariantViolated { handler: String, message: String },
}

impl HandlerError {
    pub fn new(handler: impl Into<String>, message: impl Into<String>) -> Self {
        HandlerError::InvariantViolated {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
