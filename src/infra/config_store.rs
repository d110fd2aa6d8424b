// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and restores a PipelineConfig as pretty-printed JSON.
//
// Missing fields fall back to their defaults on load, so a file
// may list only the settings it changes:
//
//   { "split_seed": 7, "forest": { "n_trees": 300 } }

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::application::pipeline_use_case::PipelineConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `cfg`, creating parent directories as needed
    pub fn save(&self, cfg: &PipelineConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved pipeline config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<PipelineConfig> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read config from '{}'. \
                 Run 'init-config' to create one.",
                self.path.display()
            )
        })?;

        let cfg: PipelineConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file '{}'", self.path.display()))?;
        Ok(cfg)
    }
}
