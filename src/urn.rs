//! # Taxonomy / URN codec
//!
//! Every entity in the world is addressed by a namespaced identifier of the
//! form `flux:<type>:<id-segments>`. This module is the single place that
//! knows how to validate, parse, and construct these strings; everything
//! downstream treats a [`Urn`] (or one of its type-tagged newtypes) as an
//! opaque, already-validated value.
//!
//! Validation runs the segment regex exactly once, at construction. There is
//! no notion of a "maybe valid" URN once it exists as a typed value.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

pub const NAMESPACE: &str = "flux";

lazy_static! {
    /// Matches the id portion after `flux:<type>:`. Rejects double
    /// hyphens, leading/trailing hyphens, underscores, spaces, and any
    /// byte outside `[A-Za-z0-9:-]`.
    static ref ID_RE: Regex = Regex::new(r"^[A-Za-z0-9]+(?:[-:][A-Za-z0-9]+)*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UrnType {
    Actor,
    Place,
    Item,
    Group,
    Session,
    Schema,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrnError {
    #[error("urn is not well-formed: {0:?}")]
    Malformed(String),
    #[error("urn {0:?} is not of type {1}")]
    WrongType(String, UrnType),
    #[error("unrecognized urn type {0:?}")]
    UnknownType(String),
    #[error("empty segment list")]
    EmptySegments,
}

/// A validated, opaque `flux:<type>:<id>` identifier.
///
/// Equality is byte equality. Canonical form lowercases the type prefix and
/// preserves whatever case the issuer used for the id portion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    /// Joins non-empty segments with `:` and validates the result against
    /// `kind`. Empty segments are dropped rather than emitted as `::`.
    pub fn make(kind: UrnType, segments: &[&str]) -> Result<Self, UrnError> {
        let joined = segments
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(":");
        if joined.is_empty() {
            return Err(UrnError::EmptySegments);
        }
        let full = format!("{}:{}:{}", NAMESPACE, kind, joined);
        Self::parse(&full)?;
        Ok(Urn(full))
    }

    /// Parses and fully validates a wire-form URN, returning its type and id
    /// segments (split on `:`).
    pub fn parse(s: &str) -> Result<(UrnType, Vec<String>), UrnError> {
        let mut parts = s.splitn(3, ':');
        let ns = parts.next().unwrap_or("");
        let ty = parts.next().unwrap_or("");
        let id = parts.next().unwrap_or("");
        if ns != NAMESPACE || ty.is_empty() || id.is_empty() {
            return Err(UrnError::Malformed(s.to_string()));
        }
        let kind: UrnType = ty
            .parse()
            .map_err(|_| UrnError::UnknownType(ty.to_string()))?;
        if !ID_RE.is_match(id) {
            return Err(UrnError::Malformed(s.to_string()));
        }
        let segments = id.split(':').map(|s| s.to_string()).collect();
        Ok((kind, segments))
    }

    /// True iff `urn` is well-formed for the given `kind`.
    pub fn validate(kind: UrnType, urn: &str) -> bool {
        matches!(Self::parse(urn), Ok((k, _)) if k == kind)
    }

    /// True iff `urn` is well-formed for *some* recognized type.
    pub fn is_well_formed(urn: &str) -> bool {
        Self::parse(urn).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> UrnType {
        // Safe: the only constructors are `make`/`of_type`, both of which
        // validate before storing.
        Self::parse(&self.0).expect("Urn invariant: stored value is always well-formed").0
    }

    /// Construct from an already-known-valid wire string, checking it
    /// matches `kind`.
    pub fn of_type(kind: UrnType, s: impl Into<String>) -> Result<Self, UrnError> {
        let s = s.into();
        let (k, _) = Self::parse(&s)?;
        if k != kind {
            return Err(UrnError::WrongType(s, kind));
        }
        Ok(Urn(s))
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a newtype wrapper around [`Urn`] pinned to a single
/// [`UrnType`]. Each wrapper is the only valid way to hold an identifier of
/// that kind — there is no way to construct one without passing through
/// `parse`/`validate`.
macro_rules! urn_newtype {
    ($name:ident, $kind:expr, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Urn);

        impl $name {
            pub const SHORT_PREFIX: &'static str = $prefix;

            pub fn parse(s: &str) -> Result<Self, UrnError> {
                Ok(Self(Urn::of_type($kind, s)?))
            }

            pub fn make(segments: &[&str]) -> Result<Self, UrnError> {
                Ok(Self(Urn::make($kind, segments)?))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            pub fn urn(&self) -> &Urn {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = UrnError;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = UrnError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }
    };
}

urn_newtype!(ActorUrn, UrnType::Actor, "a");
urn_newtype!(PlaceUrn, UrnType::Place, "p");
urn_newtype!(ItemUrn, UrnType::Item, "i");
urn_newtype!(GroupUrn, UrnType::Group, "g");
urn_newtype!(SessionUrn, UrnType::Session, "s");
urn_newtype!(SchemaUrn, UrnType::Schema, "sc");
