use crate::{Error, Result};
use evstream_engine::DEFAULT_SESSION_GAP_MINUTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the pipeline data root based on priority:
/// 1. Explicit path (CLI flag)
/// 2. EVSTREAM_DATA environment variable
/// 3. `data` under the working directory
pub fn resolve_data_root(explicit_path: Option<&str>) -> PathBuf {
    if let Some(path) = explicit_path {
        return PathBuf::from(path);
    }
    if let Ok(env_path) = std::env::var("EVSTREAM_DATA") {
        return PathBuf::from(env_path);
    }
    PathBuf::from("data")
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_gap_minutes() -> i64 {
    DEFAULT_SESSION_GAP_MINUTES
}

fn default_raw_file() -> String {
    "events_raw.csv".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base directory holding raw/, bronze/, silver/, gold/
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Inactivity gap (minutes) that closes a session
    #[serde(default = "default_gap_minutes")]
    pub session_gap_minutes: i64,

    /// Raw input filename under `<data_root>/raw/`
    #[serde(default = "default_raw_file")]
    pub raw_file: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            session_gap_minutes: default_gap_minutes(),
            raw_file: default_raw_file(),
        }
    }
}

impl PipelineConfig {
    /// Load from the default location under a data root; absent file means
    /// defaults.
    pub fn load(data_root: &Path) -> Result<Self> {
        let mut config = Self::load_from(&Self::default_path(data_root))?;
        config.data_root = data_root.to_path_buf();
        Ok(config)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path(data_root: &Path) -> PathBuf {
        data_root.join("evstream.toml")
    }

    pub fn raw_path(&self) -> PathBuf {
        self.data_root.join("raw").join(&self.raw_file)
    }

    pub fn bronze_dir(&self) -> PathBuf {
        self.data_root.join("bronze")
    }

    pub fn silver_dir(&self) -> PathBuf {
        self.data_root.join("silver")
    }

    pub fn gold_dir(&self) -> PathBuf {
        self.data_root.join("gold")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(dir.path()).unwrap();

        assert_eq!(config.session_gap_minutes, 30);
        assert_eq!(config.raw_file, "events_raw.csv");
        assert_eq!(config.data_root, dir.path());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = PipelineConfig::default_path(dir.path());

        let mut config = PipelineConfig::default();
        config.session_gap_minutes = 45;
        config.save_to(&path).unwrap();

        let loaded = PipelineConfig::load_from(&path).unwrap();
        assert_eq!(loaded.session_gap_minutes, 45);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evstream.toml");
        std::fs::write(&path, "session_gap_minutes = 10\n").unwrap();

        let loaded = PipelineConfig::load_from(&path).unwrap();
        assert_eq!(loaded.session_gap_minutes, 10);
        assert_eq!(loaded.raw_file, "events_raw.csv");
    }

    #[test]
    fn test_layout_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.raw_path(), PathBuf::from("data/raw/events_raw.csv"));
        assert_eq!(config.gold_dir(), PathBuf::from("data/gold"));
    }
}
