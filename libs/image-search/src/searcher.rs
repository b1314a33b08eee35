//! Searching a single registry

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::client::{ImageReference, RegistryClient, SystemContext, DOCKER_PREFIX, DOCKER_TRANSPORT};
use crate::error::{Error, Result};
use crate::format::{format_hit, shorten_index};
use crate::models::SearchResult;
use crate::options::SearchOptions;

/// Default (and ceiling) number of results per registry.
pub const MAX_QUERIES: usize = 25;

/// Number of hits to request from the registry client.
pub fn query_limit(requested: usize) -> usize {
    if requested > 0 {
        requested
    } else {
        MAX_QUERIES
    }
}

/// Number of the `returned` items to keep.
///
/// Recomputed from the actual count: all of them up to [`MAX_QUERIES`], or at
/// most `requested` when the caller set a limit.
pub fn retained_count(returned: usize, requested: usize) -> usize {
    if requested > 0 {
        requested.min(returned)
    } else {
        MAX_QUERIES.min(returned)
    }
}

/// Connection configuration for one registry query.
pub(crate) fn connection_context(sys: &SystemContext, options: &SearchOptions) -> SystemContext {
    let mut sys = sys.clone();
    if options.insecure_skip_tls_verify.is_set() {
        sys.docker_insecure_skip_tls_verify = options.insecure_skip_tls_verify;
    }
    if let Some(auth_file) = &options.auth_file {
        sys.auth_file_path = Some(auth_file.clone());
    }
    sys
}

pub(crate) async fn search_in_registry<C: RegistryClient>(
    client: &C,
    cancel: &CancellationToken,
    sys: &SystemContext,
    registry: &str,
    term: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchResult>> {
    let sys = connection_context(sys, options);

    if options.list_tags {
        return search_repository_tags(client, cancel, &sys, registry, term, options).await;
    }

    let hits = client
        .search_registry(cancel, &sys, registry, term, query_limit(options.limit))
        .await?;
    let index = shorten_index(registry);
    let retained = retained_count(hits.len(), options.limit);
    trace!(registry, returned = hits.len(), retained, "Registry search returned");

    Ok(hits
        .iter()
        .take(retained)
        .filter(|hit| options.filter.matches(hit))
        .map(|hit| format_hit(hit, registry, &index, options.no_trunc))
        .collect())
}

async fn search_repository_tags<C: RegistryClient>(
    client: &C,
    cancel: &CancellationToken,
    sys: &SystemContext,
    registry: &str,
    term: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchResult>> {
    let reference = resolve_docker_reference(client, registry, term)?;
    let tags = client
        .list_repository_tags(cancel, sys, &reference)
        .await
        .map_err(|e| Error::RepositoryTags(Box::new(e)))?;

    let name = reference.canonical_name();
    let retained = retained_count(tags.len(), options.limit);

    Ok(tags
        .into_iter()
        .take(retained)
        .map(|tag| SearchResult {
            name: name.clone(),
            tag: Some(tag),
            ..Default::default()
        })
        .collect())
}

/// Parse `registry/term` into a reference on the registry transport, retrying
/// with an explicit `docker://` prefix when the plain form does not parse.
fn resolve_docker_reference<C: RegistryClient>(
    client: &C,
    registry: &str,
    term: &str,
) -> Result<C::Reference> {
    let qualified = format!("{registry}/{term}");
    match client.parse_reference(&qualified) {
        Ok(reference) if reference.transport_name() == DOCKER_TRANSPORT => Ok(reference),
        Ok(_) => Err(Error::NotDockerReference(term.to_string())),
        Err(_) => client
            .parse_reference(&format!("{DOCKER_PREFIX}{qualified}"))
            .ok()
            .filter(|reference| reference.transport_name() == DOCKER_TRANSPORT)
            .ok_or_else(|| Error::NotDockerReference(term.to_string())),
    }
}
