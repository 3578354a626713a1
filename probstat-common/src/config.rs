use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{ProbStatError, DEFAULT_BINS, DEFAULT_TRIALS, MAX_TRIALS, MIN_TRIALS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub selector_width: Option<u16>, // falls back to 28 when None
}

fn default_theme() -> String {
    "dark".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            selector_width: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self { bins: default_bins() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_trials")]
    pub default_trials: u32,
}

fn default_trials() -> u32 {
    DEFAULT_TRIALS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_trials: default_trials(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub dir: Option<String>, // falls back to <data_local_dir>/probstat/logs
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub histogram: HistogramConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("probstat")
            .join("config.toml")
    }

    pub fn log_dir(&self) -> PathBuf {
        match &self.logging.dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("probstat")
                .join("logs"),
        }
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("PROBSTAT_CONFIG") {
            PathBuf::from(env_path) // $PROBSTAT_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| ProbStatError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.histogram.bins == 0 {
            return Err(ProbStatError::Config("histogram.bins must be at least 1".into()));
        }
        let trials = self.simulation.default_trials;
        if !(MIN_TRIALS..=MAX_TRIALS).contains(&trials) {
            return Err(ProbStatError::Config(format!(
                "simulation.default_trials must be in [{MIN_TRIALS}, {MAX_TRIALS}], got {trials}"
            )));
        }
        Ok(())
    }
}
