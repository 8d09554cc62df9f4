//! Configuration Management
//!
//! Handles persistent configuration storage for vpcscan.

use crate::aws::auth::{self, DEFAULT_PROFILE};
use crate::resource::scanner::DEFAULT_CONCURRENCY;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Region used when nothing else is configured
pub const FALLBACK_REGION: &str = "us-east-1";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Last used AWS profile
    #[serde(default)]
    pub profile: Option<String>,
    /// Last used region
    #[serde(default)]
    pub region: Option<String>,
    /// Last scanned VPC
    #[serde(default)]
    pub last_vpc_id: Option<String>,
    /// Items each scanner works on at once
    #[serde(default)]
    pub concurrency: Option<usize>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vpcscan").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse configuration, falling back to defaults on corrupt content
    pub fn from_json(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config file: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective profile (CLI > config > AWS_PROFILE > default)
    pub fn effective_profile(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.profile.clone())
            .or_else(|| std::env::var("AWS_PROFILE").ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Get effective region (CLI > config > AWS env/config files > us-east-1)
    pub fn effective_region(&self, cli: Option<&str>, profile: &str) -> String {
        cli.map(str::to_string)
            .or_else(|| self.region.clone())
            .or_else(|| auth::get_default_region(profile))
            .unwrap_or_else(|| FALLBACK_REGION.to_string())
    }

    /// Get effective per-scanner concurrency (CLI > config > default)
    pub fn effective_concurrency(&self, cli: Option<usize>) -> usize {
        cli.or(self.concurrency)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Remember what a successful run used
    pub fn remember(&mut self, profile: &str, region: &str, vpc_id: &str) {
        self.profile = Some(profile.to_string());
        self.region = Some(region.to_string());
        self.last_vpc_id = Some(vpc_id.to_string());
    }
}
