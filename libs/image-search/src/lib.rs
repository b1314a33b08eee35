//! Federated Container Image Search
//!
//! This crate searches container images, or the tags of a single image,
//! across a set of registries concurrently and merges the results into a
//! single filtered list.
//!
//! The registry protocol itself is not part of this crate: callers plug in a
//! [`RegistryClient`] implementation. The registries searched for unqualified
//! terms come from a [`RegistriesProvider`], by default [`RegistriesConf`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use image_search::{ImageSearcher, SearchOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(client: impl image_search::RegistryClient) -> image_search::Result<()> {
//! let searcher = ImageSearcher::new(client);
//! let results = searcher
//!     .search(&CancellationToken::new(), "quay.io/podman", &SearchOptions::default())
//!     .await?;
//! for result in results {
//!     println!("{} {}", result.name, result.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
pub mod client;
pub mod error;
pub mod format;
pub mod models;
pub mod options;
pub mod registries;
pub mod search;
pub mod searcher;
pub mod term;

pub use client::{ImageReference, RegistryClient, SystemContext};
pub use error::{Error, Result, SearchErrors};
pub use models::{RawRegistryHit, SearchResult};
pub use options::{OptionalBool, SearchFilter, SearchOptions};
pub use registries::{RegistriesConf, RegistriesProvider, StaticRegistries};
pub use search::{ImageSearcher, MAX_PARALLEL_SEARCHES};
pub use term::{parse_term, SearchTerm};
