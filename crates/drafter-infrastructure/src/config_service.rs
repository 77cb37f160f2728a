//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from the configuration file (~/.config/drafter/config.toml)
//! and applies the `DRAFTER_API_URL` environment override.

use crate::paths::DrafterPaths;
use drafter_core::config::{API_URL_ENV, DrafterConfig};
use drafter_core::{DrafterError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the application configuration.
///
/// A missing file yields the defaults. A file that exists but does not parse
/// is reported as a configuration error instead of being silently replaced.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    api_url_override: Option<String>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<DrafterConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config file location, picking
    /// up the API URL override from the environment.
    pub fn new() -> Result<Self> {
        let path = DrafterPaths::config_file().map_err(|e| DrafterError::config(e.to_string()))?;
        Ok(Self::with_path(path).with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Creates a ConfigService reading from an explicit path, without any
    /// environment override.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            api_url_override: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Overrides `api.base_url` after loading. Blank values are ignored.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        self.api_url_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<DrafterConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = Self::load_config(&self.path)?;
        if let Some(url) = &self.api_url_override {
            tracing::debug!("[ConfigService] Using API URL override: {}", url);
            loaded.api.base_url = url.clone();
        }

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(path: &Path) -> Result<DrafterConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                path.display()
            );
            return Ok(DrafterConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            DrafterError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }
}
