use std::fs;
use std::path::Path;
use std::time::Duration;

use algoviz_core::{MAX_SIZE, MIN_SIZE};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

/// Settings read from an optional TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Pause between sort steps
    pub sort_delay_ms: u64,
    /// Interval between traversal steps
    pub traversal_tick_ms: u64,
    /// Array length shown at startup
    pub initial_size: usize,
    /// Click distance that selects a node
    pub node_radius: f64,
    /// Fixed seed for array values
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sort_delay_ms: 1000,
            traversal_tick_ms: 500,
            initial_size: 6,
            node_radius: 3.0,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("invalid config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.initial_size) {
            bail!(
                "initial_size {} is outside {}..={}",
                self.initial_size,
                MIN_SIZE,
                MAX_SIZE
            );
        }
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            bail!("node_radius must be positive, got {}", self.node_radius);
        }
        if self.traversal_tick_ms == 0 {
            bail!("traversal_tick_ms must be at least 1");
        }
        Ok(())
    }

    pub fn sort_delay(&self) -> Duration {
        Duration::from_millis(self.sort_delay_ms)
    }

    pub fn traversal_tick(&self) -> Duration {
        Duration::from_millis(self.traversal_tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_keys_take_defaults() {
        let config = AppConfig::from_toml("sort_delay_ms = 50\nseed = 7\n").unwrap();
        assert_eq!(
            config,
            AppConfig {
                sort_delay_ms: 50,
                seed: Some(7),
                ..AppConfig::default()
            }
        );
        assert_eq!(config.traversal_tick(), Duration::from_millis(500));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "initial_size = 40").unwrap();
        writeln!(file, "node_radius = 4.5").unwrap();

        let config = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.initial_size, 40);
        assert_eq!(config.node_radius, 4.5);
        assert_eq!(config.sort_delay(), Duration::from_secs(1));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn out_of_range_size_is_rejected() {
        let err = AppConfig::from_toml("initial_size = 200").unwrap_err();
        assert!(err.to_string().contains("initial_size"));
        assert!(AppConfig::from_toml("initial_size = 5").is_err());
        assert!(AppConfig::from_toml("node_radius = 0.0").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
