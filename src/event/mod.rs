//! # Event & error channels
//!
//! The executor never returns errors by value for handler-reported
//! failures, and handlers never return their domain events by value either
//! — both are appended to sinks owned by the
//! [`crate::context::TransformerContext`] they're threaded through.
//!
//! - [`Event`] is a domain event emitted by a handler's `reduce`. Its
//!   payload schema belongs to the narrative/template layer (out of scope
//!   here); this module only guarantees ordering (handler reduction order)
//!   and session threading.
//! - [`ErrorEntry`] is a single declared failure, soft or hard, appended via
//!   [`crate::context::TransformerContext::declare_error`]. `correlation_id`
//!   is always the originating `command.id` or `intent.id`.

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;
use crate::urn::SessionUrn;

/// A single declared failure, soft or otherwise. `correlation_id` is the
/// originating `command.id` or `intent.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    pub correlation_id: Option<String>,
    pub ts: Timestamp,
}

/// A domain event emitted by a handler. The payload schema is owned by the
/// narrative/template layer and is out of scope here; this crate only
/// guarantees ordering and session threading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: String,
    pub session: Option<SessionUrn>,
    pub payload: serde_json::Value,
    pub ts: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_carries_session_and_payload_through() {
        let session = SessionUrn::make(&["combat", "sim"]).unwrap();
        let event = Event {
            kind: "STRUCK".to_string(),
            session: Some(session.clone()),
            payload: serde_json::json!({ "damage": 4 }),
            ts: Timestamp::from_millis(1),
        };
        assert_eq!(event.session, Some(session));
        assert_eq!(event.payload["damage"], 4);
    }

    #[test]
    fn error_entry_carries_correlation_id() {
        let entry = ErrorEntry {
            message: "INVALID_SYNTAX".to_string(),
            correlation_id: Some("cmd-1".to_string()),
            ts: Timestamp::from_millis(1),
        };
        assert_eq!(entry.correlation_id.as_deref(), Some("cmd-1"));
    }
}
