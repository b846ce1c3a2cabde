//! Pipeline-wide tunables, following the teacher's `SystemConfig` shape: a
//! plain serde-derived struct with named defaults rather than magic
//! literals scattered through the resolver and sanitizer.

use serde::{Deserialize, Serialize};

fn default_prefix_match_threshold() -> usize {
    3
}

fn default_min_prefix_len() -> usize {
    2
}

fn default_sanitizer_max_len() -> usize {
    50
}

/// Tunables for [`crate::resolver::entity::EntityResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Cap on how much of a common prefix counts toward a fuzzy-match score.
    #[serde(default = "default_prefix_match_threshold")]
    pub prefix_match_threshold: usize,
    /// Minimum token length `findByPrefix` will act on.
    #[serde(default = "default_min_prefix_len")]
    pub min_prefix_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefix_match_threshold: default_prefix_match_threshold(),
            min_prefix_len: default_min_prefix_len(),
        }
    }
}

/// Tunables for [`crate::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    #[serde(default = "default_sanitizer_max_len")]
    pub max_len: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_len: default_sanitizer_max_len(),
        }
    }
}

/// Aggregate config for the whole pipeline. Hosts that load configuration
/// from disk can `serde_json::from_str::<PipelineConfig>(..)` the same way
/// the teacher crate loads `SystemConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}
