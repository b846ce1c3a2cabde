//! # Resolver
//!
//! Turns tokens in a parsed [`crate::intent::Intent`] into concrete world
//! entities: exact/fuzzy actor name match via [`entity::EntityResolver`],
//! plain prefix lookup via [`trie::NameTrie`], and bare-id expansion via
//! [`shorthand`].

pub mod entity;
pub mod shorthand;
pub mod trie;

pub use entity::EntityResolver;
pub use shorthand::{resolve_actor_urn, resolve_item_urn, resolve_place_urn, resolve_shorthand, ShorthandKind};
pub use trie::NameTrie;
