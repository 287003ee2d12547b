//! Configuration handling for the wizard

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides where drafts are stored
pub const DATA_DIR_ENV: &str = "PATENT_WIZARD_DATA_DIR";

const DEFAULT_GRACE_DELAY_MS: u64 = 2000;
const DEFAULT_SUBMIT_LATENCY_MS: u64 = 1500;
const DEFAULT_DRAWINGS_MAX_MB: u64 = 5;
const DEFAULT_SPECIFICATION_MAX_MB: u64 = 10;
const DEFAULT_DOCUMENTS_MAX_MB: u64 = 10;

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WizardConfig {
    /// Directory holding the saved draft
    pub data_dir: Option<PathBuf>,
    /// Pause between a successful submission and the form reset
    pub grace_delay_ms: Option<u64>,
    /// Simulated filing office round-trip time
    pub submit_latency_ms: Option<u64>,
    /// Upload limit for drawings
    pub drawings_max_mb: Option<u64>,
    /// Upload limit for the specification document
    pub specification_max_mb: Option<u64>,
    /// Upload limit for each additional document
    pub documents_max_mb: Option<u64>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "patentwizard", "patent-wizard")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: WizardConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Draft directory: env override, then config, then the platform data dir
    pub fn data_dir(&self) -> Option<PathBuf> {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| self.data_dir.clone())
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms.unwrap_or(DEFAULT_GRACE_DELAY_MS))
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms.unwrap_or(DEFAULT_SUBMIT_LATENCY_MS))
    }

    pub fn drawings_max_mb(&self) -> u64 {
        self.drawings_max_mb.unwrap_or(DEFAULT_DRAWINGS_MAX_MB)
    }

    pub fn specification_max_mb(&self) -> u64 {
        self.specification_max_mb
            .unwrap_or(DEFAULT_SPECIFICATION_MAX_MB)
    }

    pub fn documents_max_mb(&self) -> u64 {
        self.documents_max_mb.unwrap_or(DEFAULT_DOCUMENTS_MAX_MB)
    }
}
