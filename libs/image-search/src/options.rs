//! Search options and result filters

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::RawRegistryHit;

/// A boolean that may be left unset.
///
/// Unset values never constrain a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum OptionalBool {
    #[default]
    Undefined,
    True,
    False,
}

impl OptionalBool {
    pub fn is_set(self) -> bool {
        self != OptionalBool::Undefined
    }

    pub fn as_option(self) -> Option<bool> {
        match self {
            OptionalBool::Undefined => None,
            OptionalBool::True => Some(true),
            OptionalBool::False => Some(false),
        }
    }

    /// Whether `value` satisfies this constraint.
    pub fn matches(self, value: bool) -> bool {
        match self.as_option() {
            Some(expected) => expected == value,
            None => true,
        }
    }
}

impl From<bool> for OptionalBool {
    fn from(value: bool) -> Self {
        if value {
            OptionalBool::True
        } else {
            OptionalBool::False
        }
    }
}

impl From<Option<bool>> for OptionalBool {
    fn from(value: Option<bool>) -> Self {
        value.map_or(OptionalBool::Undefined, OptionalBool::from)
    }
}

impl From<OptionalBool> for Option<bool> {
    fn from(value: OptionalBool) -> Self {
        value.as_option()
    }
}

/// Options customizing an image search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchOptions {
    /// Filters applied to repository search hits.
    pub filter: SearchFilter,
    /// Maximum number of results per registry (default: 25). Must be greater
    /// than 0 to override the default.
    pub limit: usize,
    /// Keep descriptions at full length.
    pub no_trunc: bool,
    /// Path to the registry authentication file.
    pub auth_file: Option<PathBuf>,
    /// Skip TLS verification when talking to registries.
    pub insecure_skip_tls_verify: OptionalBool,
    /// List the tags of the image named by the term instead of searching.
    pub list_tags: bool,
}

/// Criteria a repository search hit must meet to be returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchFilter {
    /// Minimal number of stars.
    pub stars: u32,
    /// Only images from automated builds (or only non-automated ones).
    pub is_automated: OptionalBool,
    /// Only official images (or only non-official ones).
    pub is_official: OptionalBool,
}

impl SearchFilter {
    pub fn matches(&self, hit: &RawRegistryHit) -> bool {
        self.matches_stars(hit) && self.matches_automated(hit) && self.matches_official(hit)
    }

    fn matches_stars(&self, hit: &RawRegistryHit) -> bool {
        hit.star_count >= self.stars
    }

    fn matches_automated(&self, hit: &RawRegistryHit) -> bool {
        self.is_automated.matches(hit.is_automated)
    }

    fn matches_official(&self, hit: &RawRegistryHit) -> bool {
        self.is_official.matches(hit.is_official)
    }
}
