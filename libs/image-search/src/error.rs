//! Error types for image-search

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Image search errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read registries configuration {path}: {source}")]
    RegistriesConfRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse registries configuration {path}: {source}")]
    RegistriesConfParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Search permit pool closed")]
    PermitPoolClosed,

    #[error("reference {0:?} must be a docker reference")]
    NotDockerReference(String),

    #[error("Invalid image reference {reference:?}: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("error getting repository tags: {0}")]
    RepositoryTags(#[source] Box<Error>),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Search task for registry {registry} failed: {source}")]
    Task {
        registry: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error(transparent)]
    Multiple(#[from] SearchErrors),
}

/// Every per-registry failure of a search that produced no results.
#[derive(Debug, Default)]
pub struct SearchErrors {
    errors: Vec<Error>,
}

impl SearchErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Display for SearchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            1 => write!(f, "1 error occurred:")?,
            n => write!(f, "{n} errors occurred:")?,
        }
        for error in &self.errors {
            write!(f, "\n\t* {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SearchErrors {}

impl IntoIterator for SearchErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
