//! Immutable-by-convention snapshot of the entities a turn can see.
//!
//! `WorldProjection` is produced and consumed by the host; this crate never
//! mutates one in place. A handler that changes world state builds a
//! structurally new [`WorldProjection`] and reassigns
//! [`crate::context::TransformerContext::world`].
//!
//! Collections are keyed by URN in a `BTreeMap` rather than a `HashMap` so
//! that anything built by iterating them (the entity resolver's trie, in
//! particular) gets a deterministic build order for free, without an extra
//! sort pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::urn::{ActorUrn, GroupUrn, ItemUrn, PlaceUrn, SchemaUrn, SessionUrn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub urn: ActorUrn,
    pub name: String,
    pub location: PlaceUrn,
    pub shell: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub urn: PlaceUrn,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub urn: ItemUrn,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub urn: GroupUrn,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub urn: SessionUrn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub urn: SchemaUrn,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldProjection {
    pub actors: BTreeMap<ActorUrn, Actor>,
    pub places: BTreeMap<PlaceUrn, Place>,
    pub items: BTreeMap<ItemUrn, Item>,
    pub groups: BTreeMap<GroupUrn, Group>,
    pub sessions: BTreeMap<SessionUrn, SessionRecord>,
    pub schemas: BTreeMap<SchemaUrn, Schema>,
}

impl WorldProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.insert(actor.urn.clone(), actor);
        self
    }

    pub fn with_place(mut self, place: Place) -> Self {
        self.places.insert(place.urn.clone(), place);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.urn.clone(), item);
        self
    }
}
