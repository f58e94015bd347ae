use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_STORAGE_KEY: &str = "yearlyDataManagement";
pub(crate) const DEFAULT_LOG_FILTER: &str = "salaryui=info";

pub(crate) const ENV_DB: &str = "SALARYUI_DB";
pub(crate) const ENV_STORAGE_KEY: &str = "SALARYUI_STORAGE_KEY";
pub(crate) const ENV_LOG: &str = "SALARYUI_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) storage_key: String,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve the platform data directory, create it, and apply any
    /// environment overrides.
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "salaryui", "SalaryUI")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self::from_parts(data_dir, |name| std::env::var(name).ok()))
    }

    /// Build from a data directory and an environment lookup. Empty values
    /// count as unset.
    pub(crate) fn from_parts(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        Self {
            db_path: var(ENV_DB).map_or_else(|| data_dir.join("salaryui.db"), PathBuf::from),
            log_path: data_dir.join("salaryui.log"),
            storage_key: var(ENV_STORAGE_KEY).unwrap_or_else(|| DEFAULT_STORAGE_KEY.into()),
            log_filter: var(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        }
    }
}
