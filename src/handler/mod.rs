//! # Handler registry + executor
//!
//! A handler is the unit of concrete game logic: it exposes a declared
//! `command_type`, a pure `parse` that turns an intent into a command
//! (or declines), and a pure `reduce` that turns a `(context, command)`
//! into a new context. The registry itself is a lazily-populated,
//! process-wide `DashMap` — the concrete handler catalog (combat,
//! workbench, inventory, currency, party) is out of scope for this crate;
//! hosts register their own handlers once at startup via
//! [`register_handlers`].

use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use tracing::instrument;

use crate::command::{Command, HandlerError};
use crate::command::resolver::ParserContext;
use crate::context::TransformerContext;
use crate::error::INVALID_ACTION;
use crate::intent::Intent;

/// `type` tag + pure `parse`/`reduce` pair. `parse` returning `Ok(None)`
/// means "not mine"; it must throw (return `Err`) only on a genuine
/// internal invariant violation, never to signal a non-match. `reduce`
/// reads `context` but never mutates it in place — it returns a wholly new
/// `TransformerContext`.
pub trait Handler: Send + Sync {
    fn command_type(&self) -> &str;

    fn parse(&self, ctx: &ParserContext, intent: &Intent) -> Result<Option<Command>, HandlerError>;

    fn reduce(&self, context: &TransformerContext, command: &Command) -> Result<TransformerContext, HandlerError>;
}

lazy_static! {
    static ref HANDLERS: DashMap<String, Arc<dyn Handler>> = DashMap::new();
}

/// Registers `handlers` by their declared `command_type`, overwriting any
/// existing entry of the same name. Intended to run once at host startup;
/// safe to call again in tests after [`clear_handler_cache`].
pub fn register_handlers(handlers: Vec<Arc<dyn Handler>>) {
    for handler in handlers {
        HANDLERS.insert(handler.command_type().to_string(), handler);
    }
}

/// `O(1)` lookup into the process-wide cache.
pub fn get_handler(command_type: &str) -> Option<Arc<dyn Handler>> {
    HANDLERS.get(command_type).map(|entry| entry.value().clone())
}

/// Test-only reset of the registry. No other consumer should call this.
pub fn clear_handler_cache() {
    HANDLERS.clear();
}

pub fn available_handlers() -> Vec<String> {
    HANDLERS.iter().map(|entry| entry.key().clone()).collect()
}

/// Dispatches `command` by `command.command_type` and reduces it against
/// `context`. Never panics or propagates a handler failure: missing type,
/// unregistered type, and reducer errors are all captured onto the
/// returned context's error channel, and the context is returned unchanged
/// (by `world` reference identity) in every failure path.
#[instrument(skip(context, command), fields(command_id = %command.id, command_type = %command.command_type))]
pub fn execute_command(mut context: TransformerContext, command: &Command) -> TransformerContext {
    if command.command_type.is_empty() {
        context.declare_error(crate::error::INVALID_SYNTAX, Some(command.id.clone()));
        return context;
    }

    let Some(handler) = get_handler(&command.command_type) else {
        context.declare_error(INVALID_ACTION, Some(command.id.clone()));
        return context;
    };

    match handler.reduce(&context, command) {
        Ok(updated) => updated,
        Err(e) => {
            context.declare_error(format!("{}: {e}", command.command_type), Some(command.id.clone()));
            context
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Timestamp;
    use crate::urn::ActorUrn;
    use crate::world::WorldProjection;
    use std::sync::Mutex;

    static TEST_LOCK: Mutex<()> = Mutex::new(());

    struct Echo;

    impl Handler for Echo {
        fn command_type(&self) -> &str {
            "ECHO"
        }

        fn parse(&self, _ctx: &ParserContext, _intent: &Intent) -> Result<Option<Command>, HandlerError> {
            Ok(None)
        }

        fn reduce(&self, context: &TransformerContext, _command: &Command) -> Result<TransformerContext, HandlerError> {
            let mut next = context.clone();
            next.world = Arc::new(WorldProjection::new());
            Ok(next)
        }
    }

    struct Broken;

    impl Handler for Broken {
        fn command_type(&self) -> &str {
            "BROKEN"
        }

        fn parse(&self, _ctx: &ParserContext, _intent: &Intent) -> Result<Option<Command>, HandlerError> {
            Ok(None)
        }

        fn reduce(&self, _context: &TransformerContext, _command: &Command) -> Result<TransformerContext, HandlerError> {
            Err(HandlerError::new("BROKEN", "always fails"))
        }
    }

    fn command(command_type: &str) -> Command {
        Command {
            command_type: command_type.to_string(),
            id: "cmd-1".to_string(),
            ts: Timestamp::now(),
            actor: ActorUrn::make(&["test", "alice"]).unwrap(),
            location: None,
            session: None,
            payload: serde_json::Value::Null,
        }
    }

    #[test]
    fn unknown_command_type_preserves_world_identity() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_handler_cache();
        let context = TransformerContext::for_world(WorldProjection::new());
        let before = context.clone();
        let updated = execute_command(context, &command("NOPE"));
        assert!(updated.world_unchanged_since(&before));
        assert_eq!(updated.errors.len(), 1);
        assert_eq!(updated.errors[0].message, INVALID_ACTION);
    }

    #[test]
    fn missing_type_declares_invalid_syntax() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_handler_cache();
        let context = TransformerContext::for_world(WorldProjection::new());
        let updated = execute_command(context, &command(""));
        assert_eq!(updated.errors[0].message, crate::error::INVALID_SYNTAX);
    }

    #[test]
    fn registered_handler_dispatches_and_replaces_world() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_handler_cache();
        register_handlers(vec![Arc::new(Echo)]);
        let context = TransformerContext::for_world(
            WorldProjection::new().with_place(crate::world::Place {
                urn: crate::urn::PlaceUrn::make(&["test", "square"]).unwrap(),
                name: "square".to_string(),
            }),
        );
        let before = context.clone();
        let updated = execute_command(context, &command("ECHO"));
        assert!(!updated.world_unchanged_since(&before));
        assert!(updated.errors.is_empty());
    }

    #[test]
    fn reducer_failure_preserves_original_context_and_declares_error() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_handler_cache();
        register_handlers(vec![Arc::new(Broken)]);
        let context = TransformerContext::for_world(WorldProjection::new());
        let before = context.clone();
        let updated = execute_command(context, &command("BROKEN"));
        assert!(updated.world_unchanged_since(&before));
        assert_eq!(updated.errors.len(), 1);
        assert!(updated.errors[0].message.contains("BROKEN"));
    }
}
