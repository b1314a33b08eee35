//! Resolution of the registries searched for unqualified terms
//!
//! [`RegistriesConf`] reads the `unqualified-search-registries` key of a
//! registries.conf (v2, TOML) file and its drop-in directory:
//!
//! 1. `SystemContext::system_registries_conf_path`, if set
//! 2. `$XDG_CONFIG_HOME/containers/registries.conf`, if it exists
//! 3. `/etc/containers/registries.conf`
//!
//! Drop-ins (`*.conf`) are applied in lexical order from
//! `SystemContext::system_registries_conf_dir_path` or the `.d` directory next
//! to the main file. A drop-in that sets the key replaces the earlier value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, trace};

use crate::client::SystemContext;
use crate::error::{Error, Result};

/// System-wide registries.conf location.
pub const SYSTEM_REGISTRIES_CONF_PATH: &str = "/etc/containers/registries.conf";

/// Provides the ordered registries searched for unqualified terms.
pub trait RegistriesProvider: Send + Sync {
    fn unqualified_search_registries(&self, sys: &SystemContext) -> Result<Vec<String>>;
}

/// A fixed list of registries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistries(pub Vec<String>);

impl StaticRegistries {
    pub fn new<I, S>(registries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(registries.into_iter().map(Into::into).collect())
    }
}

impl RegistriesProvider for StaticRegistries {
    fn unqualified_search_registries(&self, _sys: &SystemContext) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Registries read from registries.conf.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistriesConf;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RegistriesFile {
    unqualified_search_registries: Option<Vec<String>>,
}

impl RegistriesProvider for RegistriesConf {
    fn unqualified_search_registries(&self, sys: &SystemContext) -> Result<Vec<String>> {
        let conf_path = conf_path(sys);
        let dropin_dir = dropin_dir(sys, &conf_path);

        let mut registries = None;
        if conf_path.exists() {
            if let Some(value) = load_file(&conf_path)?.unqualified_search_registries {
                registries = Some(value);
            }
        } else {
            debug!(path = %conf_path.display(), "Registries configuration not found");
        }

        for path in dropin_files(&dropin_dir)? {
            if let Some(value) = load_file(&path)?.unqualified_search_registries {
                registries = Some(value);
            }
        }

        Ok(registries.unwrap_or_default())
    }
}

fn conf_path(sys: &SystemContext) -> PathBuf {
    if let Some(path) = &sys.system_registries_conf_path {
        return path.clone();
    }
    dirs::config_dir()
        .map(|dir| dir.join("containers").join("registries.conf"))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from(SYSTEM_REGISTRIES_CONF_PATH))
}

fn dropin_dir(sys: &SystemContext, conf_path: &Path) -> PathBuf {
    if let Some(dir) = &sys.system_registries_conf_dir_path {
        return dir.clone();
    }
    let mut dir = conf_path.as_os_str().to_owned();
    dir.push(".d");
    PathBuf::from(dir)
}

fn dropin_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let read_err = |source| Error::RegistriesConfRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "conf") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<RegistriesFile> {
    trace!(path = %path.display(), "Loading registries configuration");
    let content = fs::read_to_string(path).map_err(|source| Error::RegistriesConfRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| Error::RegistriesConfParse {
        path: path.to_path_buf(),
        source,
    })
}
