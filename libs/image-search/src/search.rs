//! Concurrent search across all configured registries

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::{RegistryClient, SystemContext};
use crate::error::{Error, Result, SearchErrors};
use crate::models::SearchResult;
use crate::options::SearchOptions;
use crate::registries::{RegistriesConf, RegistriesProvider};
use crate::searcher::search_in_registry;
use crate::term::parse_term;

/// Maximum number of registries queried at the same time.
pub const MAX_PARALLEL_SEARCHES: usize = 6;

/// Searches images across the unqualified-search registries and any registry
/// named in the search term.
pub struct ImageSearcher<C, P = RegistriesConf> {
    client: Arc<C>,
    registries: P,
    system_context: SystemContext,
}

impl<C: RegistryClient> ImageSearcher<C> {
    /// Create a searcher that reads its registries from registries.conf.
    pub fn new(client: C) -> Self {
        Self::with_registries(client, RegistriesConf)
    }
}

impl<C, P> ImageSearcher<C, P>
where
    C: RegistryClient,
    P: RegistriesProvider,
{
    pub fn with_registries(client: C, registries: P) -> Self {
        Self {
            client: Arc::new(client),
            registries,
            system_context: SystemContext::default(),
        }
    }

    /// Use `sys` as the ambient connection configuration.
    pub fn with_system_context(mut self, sys: SystemContext) -> Self {
        self.system_context = sys;
        self
    }

    pub fn system_context(&self) -> &SystemContext {
        &self.system_context
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Search every registry for `term`.
    ///
    /// Results keep the order of the registry list. Failing registries do not
    /// affect the others: as soon as any registry returns results, those are
    /// returned and the failures are dropped. Only a search without results
    /// reports the failures, as [`Error::Multiple`].
    ///
    /// Cancelling `cancel` while waiting for a free search slot fails the
    /// whole search with [`Error::Cancelled`].
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        term: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let mut registries = self
            .registries
            .unqualified_search_registries(&self.system_context)?;

        let parsed = parse_term(term);
        if let Some(registry) = parsed.registry {
            registries.push(registry.to_string());
        }
        let term: Arc<str> = Arc::from(parsed.query);

        debug!(
            term = %term,
            registries = ?registries,
            "Searching images matching term"
        );

        let options = Arc::new(options.clone());
        let semaphore = Arc::new(Semaphore::new(MAX_PARALLEL_SEARCHES));
        let mut tasks: Vec<JoinHandle<Result<Vec<SearchResult>>>> =
            Vec::with_capacity(registries.len());

        for registry in &registries {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    for task in &tasks {
                        task.abort();
                    }
                    return Err(Error::Cancelled);
                }
                permit = semaphore.clone().acquire_owned() => {
                    permit.map_err(|_| Error::PermitPoolClosed)?
                }
            };

            let client = Arc::clone(&self.client);
            let cancel = cancel.clone();
            let sys = self.system_context.clone();
            let registry = registry.clone();
            let term = Arc::clone(&term);
            let options = Arc::clone(&options);

            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(Error::Cancelled),
                    result = search_in_registry(
                        client.as_ref(),
                        &cancel,
                        &sys,
                        &registry,
                        &term,
                        &options,
                    ) => result,
                }
            }));
        }

        // Slot i holds the outcome of registries[i]
        let mut outcomes: Vec<Option<Result<Vec<SearchResult>>>> =
            std::iter::repeat_with(|| None).take(registries.len()).collect();
        for (slot, task) in tasks.into_iter().enumerate() {
            outcomes[slot] = Some(task.await.unwrap_or_else(|source| {
                Err(Error::Task {
                    registry: registries[slot].clone(),
                    source,
                })
            }));
        }

        let mut results = Vec::new();
        let mut errors = SearchErrors::new();
        for (registry, outcome) in registries.iter().zip(outcomes.into_iter().flatten()) {
            match outcome {
                Ok(found) => results.extend(found),
                Err(e) => {
                    debug!(registry = %registry, error = %e, "Registry search failed");
                    errors.push(e);
                }
            }
        }

        // One successfully searched registry most likely holds what the user
        // is looking for.
        if !results.is_empty() {
            if !errors.is_empty() {
                debug!(
                    failed = errors.len(),
                    results = results.len(),
                    "Ignoring registry errors, other registries returned results"
                );
            }
            return Ok(results);
        }
        if errors.is_empty() {
            return Ok(results);
        }
        Err(errors.into())
    }
}
