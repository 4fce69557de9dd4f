use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

use crate::error::ConfigError;
use crate::rank::RankKey;
use crate::report::RenderOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Signed so a negative request can be reported rather than rejected by the parser.
    pub top: i64,
    pub sample_interval_ms: u64,
    pub rank_by: String,
    /// 0 disables the per-collector deadline.
    pub collector_timeout_ms: u64,
    pub format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            top: 5,
            sample_interval_ms: 1000,
            rank_by: "memory".to_string(),
            collector_timeout_ms: 0,
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_name_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { max_name_width: 32 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format `{other}` (expected text or json)")),
        }
    }
}

/// Validated, typed form of [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub top: usize,
    pub sample_interval: Duration,
    pub rank_by: RankKey,
    pub collector_timeout: Option<Duration>,
    pub format: OutputFormat,
    pub max_name_width: usize,
}

impl Settings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            top: self.top,
            rank_by: self.rank_by,
            max_name_width: self.max_name_width,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let general = &self.general;

        let top = usize::try_from(general.top).map_err(|_| {
            ConfigError::invalid("top", format!("must be zero or positive, got {}", general.top))
        })?;

        let sample_interval = Duration::from_millis(general.sample_interval_ms);
        if sample_interval < MINIMUM_CPU_UPDATE_INTERVAL {
            return Err(ConfigError::invalid(
                "sample_interval_ms",
                format!(
                    "must be at least {} ms, got {}",
                    MINIMUM_CPU_UPDATE_INTERVAL.as_millis(),
                    general.sample_interval_ms
                ),
            ));
        }

        let rank_by = general
            .rank_by
            .parse::<RankKey>()
            .map_err(|e| ConfigError::invalid("rank_by", e))?;

        let collector_timeout = match general.collector_timeout_ms {
            0 => None,
            ms => {
                let timeout = Duration::from_millis(ms);
                if timeout <= sample_interval {
                    return Err(ConfigError::invalid(
                        "collector_timeout_ms",
                        format!(
                            "must exceed the CPU sampling window ({} ms), got {ms}",
                            general.sample_interval_ms
                        ),
                    ));
                }
                Some(timeout)
            }
        };

        let format = general
            .format
            .parse::<OutputFormat>()
            .map_err(|e| ConfigError::invalid("format", e))?;

        if self.display.max_name_width == 0 {
            return Err(ConfigError::invalid("max_name_width", "must be greater than 0"));
        }

        Ok(Settings {
            top,
            sample_interval,
            rank_by,
            collector_timeout,
            format,
            max_name_width: self.display.max_name_width,
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysnap").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
            return Config::default();
        }
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
        Config::default()
    })
}
