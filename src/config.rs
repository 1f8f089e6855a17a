//! # Configuration Module
//!
//! Settings for the directory walk performed by
//! [`RouteDiscovery::discover`](crate::discovery::RouteDiscovery::discover).
//!
//! ## Environment Variables
//!
//! ### `ATTROUTE_EXTENSIONS`
//!
//! Comma-separated list of source file extensions considered during the walk.
//! Leading dots are ignored (`php,.inc` is `["php", "inc"]`).
//!
//! Default: `php`
//!
//! ### `ATTROUTE_FOLLOW_LINKS`
//!
//! `true` to descend into symbolically linked directories. Links to files are
//! always candidates. A controller reachable through two links is registered
//! once; see the discovery module.
//!
//! Default: `false`
//!
//! ### `ATTROUTE_MAX_DEPTH`
//!
//! Maximum directory depth below the root (the root's own files are depth 1).
//!
//! Default: unlimited
//!
//! ## Files
//!
//! [`DiscoveryConfig::load`] reads the same settings from YAML (`.yaml`/`.yml`)
//! or TOML:
//!
//! ```toml
//! extensions = ["php"]
//! follow_links = false
//! max_depth = 8
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use walkdir::DirEntry;

/// Name suffix a type must carry to be considered a controller.
pub const CONTROLLER_SUFFIX: &str = "Controller";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Candidate source file extensions, without the dot
    pub extensions: Vec<String>,
    /// Follow symbolic links during the walk
    pub follow_links: bool,
    /// Maximum walk depth; `None` walks the whole tree
    pub max_depth: Option<usize>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            extensions: vec!["php".to_string()],
            follow_links: false,
            max_depth: None,
        }
    }
}

impl DiscoveryConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let extensions = lookup("ATTROUTE_EXTENSIONS")
            .map(|val| parse_extensions(&val))
            .filter(|exts| !exts.is_empty())
            .unwrap_or(defaults.extensions);
        let follow_links = lookup("ATTROUTE_FOLLOW_LINKS")
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(defaults.follow_links);
        let max_depth = lookup("ATTROUTE_MAX_DEPTH")
            .and_then(|val| val.trim().parse().ok())
            .or(defaults.max_depth);

        DiscoveryConfig {
            extensions,
            follow_links,
            max_depth,
        }
    }

    /// Load configuration from a YAML or TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: DiscoveryConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("invalid TOML config {}", path.display()))?,
        };
        config.extensions = config
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .collect();
        if config.extensions.is_empty() {
            config.extensions = Self::default().extensions;
        }
        Ok(config)
    }

    /// Whether a file with this extension is a discovery candidate.
    #[must_use]
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Whether a walked entry is a regular file with an accepted extension.
    ///
    /// A symbolic link to a file counts even when `follow_links` is off;
    /// that setting only controls descending into linked directories.
    #[must_use]
    pub fn is_candidate(&self, entry: &DirEntry) -> bool {
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        is_file
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.accepts_extension(ext))
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

fn parse_extensions(val: &str) -> Vec<String> {
    val.split(',')
        .map(normalize_extension)
        .filter(|ext| !ext.is_empty())
        .collect()
}
