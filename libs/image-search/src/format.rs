//! Normalization of registry hits into search results

use crate::models::{RawRegistryHit, SearchResult};

/// Descriptions longer than this are truncated.
pub const TRUNC_LENGTH: usize = 44;

const DOCKER_HUB_INDEX: &str = "docker.io";
const FLAG_MARKER: &str = "[OK]";

/// Shorten a registry host to its last two labels, e.g.
/// "registry.access.redhat.com" becomes "redhat.com".
pub fn shorten_index(registry: &str) -> String {
    let labels: Vec<&str> = registry.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        registry.to_string()
    }
}

pub fn format_hit(
    hit: &RawRegistryHit,
    registry: &str,
    index: &str,
    no_trunc: bool,
) -> SearchResult {
    SearchResult {
        index: index.to_string(),
        name: qualified_name(&hit.name, registry, index),
        description: format_description(&hit.description, no_trunc),
        stars: hit.star_count,
        official: flag(hit.is_official),
        automated: flag(hit.is_automated),
        tag: None,
    }
}

fn qualified_name(name: &str, registry: &str, index: &str) -> String {
    // Unqualified Docker Hub images live in the implicit library namespace
    if index == DOCKER_HUB_INDEX && !name.contains('/') {
        format!("{index}/library/{name}")
    } else {
        format!("{registry}/{name}")
    }
}

fn format_description(description: &str, no_trunc: bool) -> String {
    let description = description.replace('\n', " ");
    if no_trunc || description.chars().count() <= TRUNC_LENGTH {
        return description;
    }
    let mut truncated: String = description.chars().take(TRUNC_LENGTH).collect();
    truncated.push_str("...");
    truncated
}

fn flag(value: bool) -> String {
    if value {
        FLAG_MARKER.to_string()
    } else {
        String::new()
    }
}
