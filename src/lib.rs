//! # fluxcore: the intent pipeline
//!
//! `fluxcore` turns one line of player text into a validated, executed
//! state transition against an in-memory world. The pipeline runs in three
//! stages, leaves first:
//!
//! - Taxonomy / URN codec ([`urn`]) — validate, parse, and construct
//!   namespaced identifiers (`flux:<type>:<id...>`).
//! - Intent factory ([`intent`]) — tokenize a raw line into a structured
//!   [`intent::Intent`] with quote-aware lexing and option parsing.
//! - Entity resolver ([`resolver`]) — per-turn lookup structures (name
//!   trie, exact-name map, location index) over a [`world::WorldProjection`],
//!   plus URN shorthand expansion.
//! - Command resolver ([`command::resolver`]) — tries each registered
//!   handler's `parse` in order and returns the first match.
//! - Handler registry + executor ([`handler`]) — cached `type -> handler`
//!   lookup and the `reduce` dispatch loop.
//! - Transformer context ([`context`]) — the mutable-per-turn facade
//!   (world, id/clock sources, event/error sinks, collaborator APIs)
//!   threaded through resolution and execution.
//! - Event & error channels ([`event`]) — the [`event::Event`]/
//!   [`event::ErrorEntry`] types appended to a context's sinks.
//! - Sanitizer ([`sanitize`]) — Latin-1 word-character sanitization for
//!   human-supplied free text.
//!
//! The concrete handler catalog (combat, workbench, party, inventory,
//! currency) is a host concern: this crate specifies the [`handler::Handler`]
//! contract and registry, not any particular handler.

pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod intent;
pub mod resolver;
pub mod sanitize;
pub mod timestamp;
pub mod urn;
pub mod world;

pub use command::{Command, CommandType, HandlerError};
pub use config::{PipelineConfig, ResolverConfig, SanitizerConfig};
pub use context::{Collaborators, TransformerContext};
pub use error::{Error, Result};
pub use event::{ErrorEntry, Event};
pub use intent::{Intent, IntentError, IntentParams, OptionValue};
pub use timestamp::Timestamp;
pub use urn::{ActorUrn, GroupUrn, ItemUrn, PlaceUrn, SchemaUrn, SessionUrn, Urn, UrnError, UrnType};
pub use world::WorldProjection;
