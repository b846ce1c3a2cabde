//! # Entity resolver
//!
//! Builds per-turn lookup structures over a [`WorldProjection`] and maps a
//! player-typed token to an [`Actor`]/[`Place`]/[`Item`], with deterministic
//! tie-breaking during fuzzy name match. A resolver is a pure function of
//! the world snapshot it was built from plus whatever intent/token it is
//! asked to resolve — it never mutates `world` or the intent.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::context::TransformerContext;
use crate::intent::Intent;
use crate::resolver::trie::NameTrie;
use crate::urn::{ActorUrn, PlaceUrn};
use crate::world::{Actor, Item, Place, WorldProjection};

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

pub struct EntityResolver {
    world: Arc<WorldProjection>,
    config: ResolverConfig,
    exact_name_lookup: BTreeMap<String, ActorUrn>,
    actor_trie: NameTrie,
    actors_by_location: BTreeMap<PlaceUrn, Vec<ActorUrn>>,
}

impl EntityResolver {
    /// Builds the lookup structures in one pass over `world.actors`. Later
    /// entries win collisions in `exact_name_lookup` — callers must use
    /// unique actor names for exact-match tests, per spec.
    pub fn build(world: Arc<WorldProjection>, config: ResolverConfig) -> Self {
        let mut exact_name_lookup = BTreeMap::new();
        let mut actor_trie = NameTrie::new();
        let mut actors_by_location: BTreeMap<PlaceUrn, Vec<ActorUrn>> = BTreeMap::new();

        for actor in world.actors.values() {
            let lower = actor.name.to_lowercase();
            exact_name_lookup.insert(lower.clone(), actor.urn.clone());
            actor_trie.insert(&lower, actor.urn.clone());
            actors_by_location
                .entry(actor.location.clone())
                .or_default()
                .push(actor.urn.clone());
        }

        Self {
            world,
            config,
            exact_name_lookup,
            actor_trie,
            actors_by_location,
        }
    }

    pub fn actors_in(&self, place: &PlaceUrn) -> &[ActorUrn] {
        self.actors_by_location
            .get(place)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolves `token` to an [`Actor`], honoring `match_location` (if
    /// true, only actors in `intent.location` are eligible).
    pub fn resolve_actor(&self, intent: &Intent, token: &str, match_location: bool) -> Option<Actor> {
        let lower = token.to_lowercase();

        if lower.starts_with(ACTOR_URN_PREFIX) {
            let urn = ActorUrn::parse(&lower).ok()?;
            let actor = self.world.actors.get(&urn)?;
            return if !match_location || Some(&actor.location) == intent.location.as_ref() {
                Some(actor.clone())
            } else {
                None
            };
        }

        if let Some(urn) = self.exact_name_lookup.get(&lower) {
            if let Some(actor) = self.world.actors.get(urn) {
                if !match_location || Some(&actor.location) == intent.location.as_ref() {
                    return Some(actor.clone());
                }
            }
        }

        let candidates = self.actor_trie.find_by_prefix(&lower, self.config.min_prefix_len);
        if candidates.is_empty() {
            return None;
        }

        let mut best: Option<(i64, Actor)> = None;
        for urn in candidates {
            let Some(actor) = self.world.actors.get(&urn) else {
                continue;
            };
            let in_same_location = Some(&actor.location) == intent.location.as_ref();
            if match_location && !in_same_location {
                continue;
            }

            let name_lower = actor.name.to_lowercase();
            let common = common_prefix_len(&lower, &name_lower);
            let prefix_len = common
                .min(lower.chars().count())
                .min(name_lower.chars().count())
                .min(self.config.prefix_match_threshold);
            if prefix_len < 2 {
                continue;
            }

            let score = prefix_len as i64 + if in_same_location { 100 } else { 0 };
            let is_new_best = match &best {
                Some((best_score, _)) => score > *best_score,
                None => true,
            };
            if is_new_best {
                best = Some((score, actor.clone()));
            }
        }

        best.map(|(_, actor)| actor)
    }

    /// Returns the intent's current place, regardless of `token`. This is
    /// the spec's explicit current contract, not a placeholder dropped by
    /// this crate — see `DESIGN.md` for the Open Question decision.
    pub fn resolve_place(&self, intent: &Intent, _token: Option<&str>) -> Option<Place> {
        intent
            .location
            .as_ref()
            .and_then(|loc| self.world.places.get(loc))
            .cloned()
    }

    /// Out of scope: delegates entirely to `context.inventory_api`.
    pub fn resolve_item(&self, context: &TransformerContext, actor: &ActorUrn, token: &str) -> Option<Item> {
        let item_urn = context.inventory_api.find_item(actor, token)?;
        self.world.items.get(&item_urn).cloned()
    }

    /// Out of scope: delegates entirely to `context.inventory_api`.
    pub fn resolve_inventory_item(
        &self,
        context: &TransformerContext,
        intent: &Intent,
        token: &str,
    ) -> Option<Item> {
        self.resolve_item(context, &intent.actor, token)
    }

    pub fn resolve_equipped_weapon(
        &self,
        context: &TransformerContext,
        intent: &Intent,
        token: Option<&str>,
    ) -> Option<Item> {
        let actor_urn = match token {
            Some(t) => self.resolve_actor(intent, t, true)?.urn,
            None => intent.actor.clone(),
        };
        let item_urn = context.equipment_api.get_equipped_weapon(&actor_urn)?;
        self.world.items.get(&item_urn).cloned()
    }
}

pub const ACTOR_URN_PREFIX: &str = "flux:actor:";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Intent, IntentParams};
    use crate::timestamp::Timestamp;
    use crate::world::Place;

    fn make_intent(actor: &str, location: &str, text: &str) -> Intent {
        Intent::new(
            IntentParams {
                id: None,
                ts: None,
                actor,
                location: Some(location),
                session: None,
                text,
            },
            || "idx".to_string(),
            Timestamp::now,
        )
        .unwrap()
    }

    fn world_with_bob_and_alice() -> WorldProjection {
        let square = PlaceUrn::make(&["test", "square"]).unwrap();
        WorldProjection::new()
            .with_place(Place {
                urn: square.clone(),
                name: "square".to_string(),
            })
            .with_actor(Actor {
                urn: ActorUrn::make(&["test", "bob"]).unwrap(),
                name: "Bob".to_string(),
                location: square.clone(),
                shell: None,
            })
            .with_actor(Actor {
                urn: ActorUrn::make(&["test", "alice"]).unwrap(),
                name: "Alice".to_string(),
                location: square,
                shell: None,
            })
    }

    #[test]
    fn resolves_exact_name_in_same_location() {
        let world = Arc::new(world_with_bob_and_alice());
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "attack bob");
        let actor = resolver.resolve_actor(&intent, "bob", true).unwrap();
        assert_eq!(actor.name, "Bob");
    }

    #[test]
    fn resolves_by_exact_urn_without_falling_through_to_name() {
        let world = Arc::new(world_with_bob_and_alice());
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "attack");
        let actor = resolver
            .resolve_actor(&intent, "flux:actor:test:bob", true)
            .unwrap();
        assert_eq!(actor.name, "Bob");
    }

    #[test]
    fn malformed_urn_prefix_does_not_fall_through_to_name_match() {
        let world = Arc::new(world_with_bob_and_alice());
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "attack");
        // "flux:actor:" + garbage must not match an actor named "Bob" via prefix search.
        assert!(resolver
            .resolve_actor(&intent, "flux:actor:not-a-real-actor", true)
            .is_none());
    }

    #[test]
    fn fuzzy_prefix_prefers_same_location() {
        let square = PlaceUrn::make(&["test", "square"]).unwrap();
        let tavern = PlaceUrn::make(&["test", "tavern"]).unwrap();
        let world = Arc::new(
            WorldProjection::new()
                .with_place(Place {
                    urn: square.clone(),
                    name: "square".to_string(),
                })
                .with_place(Place {
                    urn: tavern.clone(),
                    name: "tavern".to_string(),
                })
                .with_actor(Actor {
                    urn: ActorUrn::make(&["test", "bob-far"]).unwrap(),
                    name: "Bobby".to_string(),
                    location: tavern,
                    shell: None,
                })
                .with_actor(Actor {
                    urn: ActorUrn::make(&["test", "bob-near"]).unwrap(),
                    name: "Bobcat".to_string(),
                    location: square.clone(),
                    shell: None,
                }),
        );
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "attack bob");
        let actor = resolver.resolve_actor(&intent, "bob", false).unwrap();
        assert_eq!(actor.name, "Bobcat");
    }

    #[test]
    fn idempotent_resolution() {
        let world = Arc::new(world_with_bob_and_alice());
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "attack bob");
        let first = resolver.resolve_actor(&intent, "bob", true);
        let second = resolver.resolve_actor(&intent, "bob", true);
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_place_returns_current_location_regardless_of_token() {
        let world = Arc::new(world_with_bob_and_alice());
        let resolver = EntityResolver::build(world, ResolverConfig::default());
        let intent = make_intent("flux:actor:test:alice", "flux:place:test:square", "go tavern");
        let place = resolver.resolve_place(&intent, Some("tavern")).unwrap();
        assert_eq!(place.name, "square");
    }
}
