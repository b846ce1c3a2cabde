//! # Transformer context
//!
//! The mutable-per-turn facade threaded through resolution and execution:
//! the world snapshot, id/clock sources, the event and error sinks, and the
//! narrow collaborator APIs (equipment, schema translation, mass, party)
//! that concrete handlers depend on. Collaborator shapes are intentionally
//! narrow traits — this crate only specifies the capability surface a
//! handler may call through, not the concrete domain logic behind it
//! (that's the catalog of handlers, out of scope here).

use std::sync::Arc;

use uuid::Uuid;

use crate::event::{ErrorEntry, Event};
use crate::timestamp::Timestamp;
use crate::urn::{ActorUrn, GroupUrn, ItemUrn, SchemaUrn};
use crate::world::WorldProjection;

pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

pub trait ClockSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Default id source: a 24-character base62-flavored UUID, matching the
/// intent factory's typical id shape.
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Default clock source: the real system clock.
pub struct SystemClockSource;

impl ClockSource for SystemClockSource {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

pub trait EquipmentApi: Send + Sync {
    fn get_equipped_weapon(&self, actor: &ActorUrn) -> Option<ItemUrn>;
}

pub trait SchemaManager: Send + Sync {
    fn get_schema_translation(&self, schema: &SchemaUrn, key: &str) -> Option<String>;
}

pub trait MassApi: Send + Sync {
    fn mass_of(&self, item: &ItemUrn) -> Option<f64>;
}

pub trait PartyApi: Send + Sync {
    fn party_of(&self, actor: &ActorUrn) -> Option<GroupUrn>;
}

pub trait InventoryApi: Send + Sync {
    fn find_item(&self, actor: &ActorUrn, token: &str) -> Option<ItemUrn>;
}

struct NoopCollaborators;

impl EquipmentApi for NoopCollaborators {
    fn get_equipped_weapon(&self, _actor: &ActorUrn) -> Option<ItemUrn> {
        None
    }
}

impl SchemaManager for NoopCollaborators {
    fn get_schema_translation(&self, _schema: &SchemaUrn, _key: &str) -> Option<String> {
        None
    }
}

impl MassApi for NoopCollaborators {
    fn mass_of(&self, _item: &ItemUrn) -> Option<f64> {
        None
    }
}

impl PartyApi for NoopCollaborators {
    fn party_of(&self, _actor: &ActorUrn) -> Option<GroupUrn> {
        None
    }
}

impl InventoryApi for NoopCollaborators {
    fn find_item(&self, _actor: &ActorUrn, _token: &str) -> Option<ItemUrn> {
        None
    }
}

/// Per-turn value threaded through resolution and execution. Created at
/// turn start, mutated in place by handlers (events appended, `world`
/// possibly rebound to a structurally new value), and returned. Callers
/// needing isolation between turns should `clone()` before calling.
#[derive(Clone)]
pub struct TransformerContext {
    pub world: Arc<WorldProjection>,
    pub events: Vec<Event>,
    pub errors: Vec<ErrorEntry>,
    id_source: Arc<dyn IdSource>,
    clock_source: Arc<dyn ClockSource>,
    pub equipment_api: Arc<dyn EquipmentApi>,
    pub schema_manager: Arc<dyn SchemaManager>,
    pub mass: Arc<dyn MassApi>,
    pub party_api: Arc<dyn PartyApi>,
    pub inventory_api: Arc<dyn InventoryApi>,
}

/// Builder-style collaborator bundle, so test code only overrides what it
/// needs instead of naming every field.
#[derive(Clone)]
pub struct Collaborators {
    pub id_source: Arc<dyn IdSource>,
    pub clock_source: Arc<dyn ClockSource>,
    pub equipment_api: Arc<dyn EquipmentApi>,
    pub schema_manager: Arc<dyn SchemaManager>,
    pub mass: Arc<dyn MassApi>,
    pub party_api: Arc<dyn PartyApi>,
    pub inventory_api: Arc<dyn InventoryApi>,
}

impl Default for Collaborators {
    fn default() -> Self {
        let noop = Arc::new(NoopCollaborators);
        Self {
            id_source: Arc::new(UuidIdSource),
            clock_source: Arc::new(SystemClockSource),
            equipment_api: noop.clone(),
            schema_manager: noop.clone(),
            mass: noop.clone(),
            party_api: noop.clone(),
            inventory_api: noop,
        }
    }
}

impl TransformerContext {
    pub fn new(world: WorldProjection, collaborators: Collaborators) -> Self {
        Self {
            world: Arc::new(world),
            events: Vec::new(),
            errors: Vec::new(),
            id_source: collaborators.id_source,
            clock_source: collaborators.clock_source,
            equipment_api: collaborators.equipment_api,
            schema_manager: collaborators.schema_manager,
            mass: collaborators.mass,
            party_api: collaborators.party_api,
            inventory_api: collaborators.inventory_api,
        }
    }

    /// Convenience constructor for tests: real clock, uuid ids, and no-op
    /// collaborators.
    pub fn for_world(world: WorldProjection) -> Self {
        Self::new(world, Collaborators::default())
    }

    pub fn uniqid(&self) -> String {
        self.id_source.next_id()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.clock_source.now()
    }

    /// Appends to the error channel without ever throwing. `correlation_id`
    /// should be the originating `command.id` or `intent.id`.
    pub fn declare_error(&mut self, message: impl Into<String>, correlation_id: Option<String>) {
        self.errors.push(ErrorEntry {
            message: message.into(),
            correlation_id,
            ts: self.timestamp(),
        });
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Reference-identity check on `world`, used by callers to detect a
    /// no-op execution (`executeCommand(ctx, cmd).world === ctx.world`).
    pub fn world_unchanged_since(&self, other: &TransformerContext) -> bool {
        Arc::ptr_eq(&self.world, &other.world)
    }
}
