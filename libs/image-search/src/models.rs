//! Data models for search results

use serde::{Deserialize, Serialize};

/// A single image (or image tag) found in a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Image index, e.g. "docker.io" or "quay.io".
    pub index: String,
    /// Fully qualified image name, e.g. "docker.io/library/alpine".
    pub name: String,
    pub description: String,
    pub stars: u32,
    /// "[OK]" for official images, empty otherwise.
    pub official: String,
    /// "[OK]" for images built by an automated build, empty otherwise.
    pub automated: String,
    /// Set only when listing tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Repository hit as returned by a registry's search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegistryHit {
    pub name: String,
    pub description: String,
    pub star_count: u32,
    pub is_official: bool,
    pub is_automated: bool,
}
