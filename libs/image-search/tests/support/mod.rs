//! Scripted registry client for search tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use image_search::client::{DOCKER_PREFIX, DOCKER_TRANSPORT};
use image_search::{
    Error, ImageReference, RawRegistryHit, RegistryClient, Result, SystemContext,
};
use tokio_util::sync::CancellationToken;

/// Transports other than the registry one the mock understands.
const OTHER_TRANSPORTS: &[&str] = &["oci", "dir", "docker-archive"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReference {
    pub transport: String,
    pub name: String,
}

impl ImageReference for MockReference {
    fn transport_name(&self) -> &str {
        &self.transport
    }

    fn canonical_name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone)]
enum Response {
    Hits(Vec<RawRegistryHit>),
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct SearchCall {
    pub registry: String,
    pub term: String,
    pub limit: usize,
    pub sys: SystemContext,
}

#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Response>,
    delays: HashMap<String, Duration>,
    tags: HashMap<String, Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<SearchCall>>,
    tag_calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, registry: &str, hits: Vec<RawRegistryHit>) -> Self {
        self.responses
            .insert(registry.to_string(), Response::Hits(hits));
        self
    }

    pub fn with_failure(mut self, registry: &str, message: &str) -> Self {
        self.responses
            .insert(registry.to_string(), Response::Failure(message.to_string()));
        self
    }

    pub fn with_delay(mut self, registry: &str, delay: Duration) -> Self {
        self.delays.insert(registry.to_string(), delay);
        self
    }

    pub fn with_tags(mut self, repository: &str, tags: &[&str]) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tag_calls(&self) -> Vec<String> {
        self.tag_calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, registry: &str) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(registry) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegistryClient for MockClient {
    type Reference = MockReference;

    async fn search_registry(
        &self,
        _cancel: &CancellationToken,
        sys: &SystemContext,
        registry: &str,
        term: &str,
        limit: usize,
    ) -> Result<Vec<RawRegistryHit>> {
        self.calls.lock().unwrap().push(SearchCall {
            registry: registry.to_string(),
            term: term.to_string(),
            limit,
            sys: sys.clone(),
        });
        self.enter(registry).await;

        match self.responses.get(registry) {
            Some(Response::Hits(hits)) => Ok(hits.clone()),
            Some(Response::Failure(message)) => Err(Error::Registry(message.clone())),
            None => Err(Error::Registry(format!("pinging registry {registry}: no such host"))),
        }
    }

    async fn list_repository_tags(
        &self,
        _cancel: &CancellationToken,
        _sys: &SystemContext,
        reference: &MockReference,
    ) -> Result<Vec<String>> {
        self.tag_calls.lock().unwrap().push(reference.name.clone());
        self.tags
            .get(&reference.name)
            .cloned()
            .ok_or_else(|| Error::Registry(format!("repository {} not found", reference.name)))
    }

    fn parse_reference(&self, reference: &str) -> Result<MockReference> {
        let invalid = |reason: &str| Error::InvalidReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        if let Some(name) = reference.strip_prefix(DOCKER_PREFIX) {
            let valid = !name.is_empty()
                && !name.contains(char::is_whitespace)
                && !name.chars().any(|c| c.is_ascii_uppercase());
            if !valid {
                return Err(invalid("invalid reference format"));
            }
            return Ok(MockReference {
                transport: DOCKER_TRANSPORT.to_string(),
                name: name.to_string(),
            });
        }

        match reference.split_once(':') {
            Some((transport, name)) if OTHER_TRANSPORTS.contains(&transport) => Ok(MockReference {
                transport: transport.to_string(),
                name: name.to_string(),
            }),
            _ => Err(invalid("invalid transport")),
        }
    }
}

pub fn hit(name: &str, stars: u32) -> RawRegistryHit {
    RawRegistryHit {
        name: name.to_string(),
        description: format!("The {name} image"),
        star_count: stars,
        is_official: false,
        is_automated: false,
    }
}

pub fn hits(prefix: &str, count: usize) -> Vec<RawRegistryHit> {
    (0..count).map(|i| hit(&format!("{prefix}-{i}"), i as u32)).collect()
}
