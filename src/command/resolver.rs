//! # Command resolver (parser registry)
//!
//! Tries each registered handler's `parse` in declaration order and returns
//! the first non-null [`Command`]. [`ParserContext`] owns `Arc`-cloned
//! state rather than borrowing the caller's [`TransformerContext`], so the
//! caller keeps an owned, mutably borrowable context to declare errors on
//! through the loop.

use std::sync::Arc;

use tracing::instrument;

use crate::command::Command;
use crate::config::ResolverConfig;
use crate::context::TransformerContext;
use crate::error::INVALID_SYNTAX;
use crate::handler::Handler;
use crate::intent::Intent;
use crate::resolver::EntityResolver;
use crate::timestamp::Timestamp;
use crate::world::WorldProjection;

/// Read-only view handed to each handler's `parse`. Built fresh per call to
/// `resolve_command_from_intent`.
pub struct ParserContext {
    pub world: Arc<WorldProjection>,
    pub resolver: Arc<EntityResolver>,
    snapshot: TransformerContext,
}

impl ParserContext {
    pub fn build(context: &TransformerContext, resolver_config: ResolverConfig) -> Self {
        let world = context.world.clone();
        let resolver = Arc::new(EntityResolver::build(world.clone(), resolver_config));
        Self {
            world,
            resolver,
            snapshot: context.clone(),
        }
    }

    pub fn uniqid(&self) -> String {
        self.snapshot.uniqid()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.snapshot.timestamp()
    }

    pub fn collaborators(&self) -> &TransformerContext {
        &self.snapshot
    }
}

/// Tries `handlers` in order. On the first non-null `parse` result, overlays
/// `{actor, location, session, id, ts}` from `intent` onto the returned
/// command (handler-declared fields win for everything else) and returns
/// it. A handler that errors gets its failure declared on `context` and
/// resolution continues with the next handler. No match declares
/// `INVALID_SYNTAX`.
#[instrument(skip(context, handlers), fields(intent_id = %intent.id))]
pub fn resolve_command_from_intent(
    context: &mut TransformerContext,
    intent: &Intent,
    handlers: &[Arc<dyn Handler>],
    resolver_config: ResolverConfig,
) -> Option<Command> {
    let parser_ctx = ParserContext::build(context, resolver_config);

    for handler in handlers {
        match handler.parse(&parser_ctx, intent) {
            Ok(Some(mut command)) => {
                command.actor = intent.actor.clone();
                command.location = intent.location.clone();
                command.session = intent.session.clone();
                command.id = intent.id.clone();
                command.ts = intent.ts;
                return Some(command);
            }
            Ok(None) => continue,
            Err(e) => {
                context.declare_error(format!("{}: {e}", handler.command_type()), Some(intent.id.clone()));
                continue;
            }
        }
    }

    context.declare_error(INVALID_SYNTAX, Some(intent.id.clone()));
    None
}
