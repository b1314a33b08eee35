//! Registry client capability consumed by the searcher
//!
//! The wire protocol (authentication, HTTP, pagination) lives behind
//! [`RegistryClient`]; this crate only orchestrates calls to it.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::RawRegistryHit;
use crate::options::OptionalBool;

/// Transport name of references that point at a registry.
pub const DOCKER_TRANSPORT: &str = "docker";

/// Prefix that forces a reference onto the registry transport.
pub const DOCKER_PREFIX: &str = "docker://";

/// Connection configuration handed to the registry client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemContext {
    /// Path to the registry authentication file.
    pub auth_file_path: Option<PathBuf>,
    pub docker_insecure_skip_tls_verify: OptionalBool,
    /// Overrides the registries.conf location.
    pub system_registries_conf_path: Option<PathBuf>,
    /// Overrides the registries.conf drop-in directory.
    pub system_registries_conf_dir_path: Option<PathBuf>,
}

/// A parsed image reference.
pub trait ImageReference: Send + Sync {
    /// Name of the transport the reference resolved to, e.g. "docker" or "oci".
    fn transport_name(&self) -> &str;

    /// Canonical repository name without tag or digest.
    fn canonical_name(&self) -> String;
}

#[async_trait]
pub trait RegistryClient: Send + Sync + 'static {
    type Reference: ImageReference + 'static;

    /// Search `registry` for repositories matching `term`, fetching at most
    /// `limit` hits.
    async fn search_registry(
        &self,
        cancel: &CancellationToken,
        sys: &SystemContext,
        registry: &str,
        term: &str,
        limit: usize,
    ) -> Result<Vec<RawRegistryHit>>;

    /// Retrieve every tag of the repository `reference` points at.
    async fn list_repository_tags(
        &self,
        cancel: &CancellationToken,
        sys: &SystemContext,
        reference: &Self::Reference,
    ) -> Result<Vec<String>>;

    /// Parse a transport-qualified image name such as "docker://quay.io/foo".
    fn parse_reference(&self, reference: &str) -> Result<Self::Reference>;
}
