//! # URN shorthand resolver
//!
//! Pure, world-free token-to-URN normalization used by handlers that
//! accept player-typed URN-ish arguments. Lets callers write a short form
//! (`a:bob`, `p:square`) or a bare id (`bob`) instead of a fully namespaced
//! `flux:<type>:<id>` string, without ever checking whether the result
//! exists in the world.

use crate::urn::{ActorUrn, ItemUrn, PlaceUrn, Urn, UrnError, UrnType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandKind {
    Actor,
    Place,
    Item,
}

impl ShorthandKind {
    fn urn_type(self) -> UrnType {
        match self {
            ShorthandKind::Actor => UrnType::Actor,
            ShorthandKind::Place => UrnType::Place,
            ShorthandKind::Item => UrnType::Item,
        }
    }

    /// Configured short prefixes for this kind, per the spec's table:
    /// actor -> `a`/`actor`, place -> `p`/`place`, item -> `i`/`item`.
    fn short_prefixes(self) -> &'static [&'static str] {
        match self {
            ShorthandKind::Actor => &["a", "actor"],
            ShorthandKind::Place => &["p", "place"],
            ShorthandKind::Item => &["i", "item"],
        }
    }

    fn full_prefix(self) -> String {
        format!("{}:{}:", crate::urn::NAMESPACE, self.urn_type())
    }
}

/// Resolves `token` to a fully namespaced URN of `kind`.
///
/// 1. If `token` already starts with the full prefix (`flux:<kind>:`), pass
///    it through unchanged.
/// 2. Else if it starts with any of `kind`'s configured short prefixes
///    followed by `:`, replace that short prefix with the full one.
/// 3. Else if it contains `:`, treat it as a URN fragment and prepend the
///    full prefix to the whole token.
/// 4. Else prepend the full prefix to the bare id.
///
/// No world-existence check is performed; the result is only guaranteed to
/// be a well-formed URN of `kind`.
pub fn resolve_shorthand(kind: ShorthandKind, token: &str) -> Result<Urn, UrnError> {
    let full_prefix = kind.full_prefix();

    if let Some(rest) = token.strip_prefix(&full_prefix) {
        return Urn::make(kind.urn_type(), &[rest]);
    }

    for short in kind.short_prefixes() {
        let marker = format!("{}:", short);
        if let Some(rest) = token.strip_prefix(&marker) {
            return Urn::make(kind.urn_type(), &[rest]);
        }
    }

    // Contains `:` (a fragment) or a bare id either way: prepend the full
    // prefix to the whole token and validate it as one joined id.
    Urn::make(kind.urn_type(), &[token])
}

pub fn resolve_actor_urn(token: &str) -> Result<ActorUrn, UrnError> {
    resolve_shorthand(ShorthandKind::Actor, token).and_then(|urn| ActorUrn::parse(urn.as_str()))
}

pub fn resolve_place_urn(token: &str) -> Result<PlaceUrn, UrnError> {
    resolve_shorthand(ShorthandKind::Place, token).and_then(|urn| PlaceUrn::parse(urn.as_str()))
}

pub fn resolve_item_urn(token: &str) -> Result<ItemUrn, UrnError> {
    resolve_shorthand(ShorthandKind::Item, token).and_then(|urn| ItemUrn::parse(urn.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_expands_to_full_urn() {
        let urn = resolve_actor_urn("bob").unwrap();
        assert_eq!(urn.as_str(), "flux:actor:bob");
    }

    #[test]
    fn already_full_urn_passes_through() {
        let urn = resolve_actor_urn("flux:actor:test:bob").unwrap();
        assert_eq!(urn.as_str(), "flux:actor:test:bob");
    }

    #[test]
    fn short_single_letter_prefix_expands() {
        let urn = resolve_actor_urn("a:bob").unwrap();
        assert_eq!(urn.as_str(), "flux:actor:bob");
    }

    #[test]
    fn short_word_prefix_expands() {
        let urn = resolve_place_urn("place:square").unwrap();
        assert_eq!(urn.as_str(), "flux:place:square");

        let urn = resolve_actor_urn("npc:guard").unwrap();
        assert_eq!(urn.as_str(), "flux:actor:npc:guard");
    }

    #[test]
    fn item_short_prefix_expands() {
        let urn = resolve_item_urn("i:sword").unwrap();
        assert_eq!(urn.as_str(), "flux:item:sword");
    }

    #[test]
    fn fragment_with_colon_but_no_short_prefix_gets_full_prefix_prepended() {
        let urn = resolve_actor_urn("npc:guard:captain").unwrap();
        assert_eq!(urn.as_str(), "flux:actor:npc:guard:captain");
    }

    #[test]
    fn malformed_bare_id_rejected() {
        assert!(resolve_actor_urn("bo b").is_err());
    }

    #[test]
    fn idempotent() {
        let once = resolve_actor_urn("a:bob").unwrap();
        let twice = resolve_actor_urn(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
