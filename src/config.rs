use chrono::Duration;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::filter::FilterEngine;
use crate::orbit::{GroundTrackOptions, DEFAULT_POINT_COUNT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ground_track: GroundTrackConfig,
    #[serde(default)]
    pub orbit_trace: OrbitTraceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundTrackConfig {
    #[serde(default = "default_step", deserialize_with = "duration")]
    pub step: Duration,
    #[serde(default = "default_fallback_window", deserialize_with = "duration")]
    pub fallback_window: Duration,
    #[serde(default = "default_fallback_step", deserialize_with = "duration")]
    pub fallback_step: Duration,
}

impl Default for GroundTrackConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            fallback_window: default_fallback_window(),
            fallback_step: default_fallback_step(),
        }
    }
}

fn default_step() -> Duration {
    GroundTrackOptions::default().step
}

fn default_fallback_window() -> Duration {
    GroundTrackOptions::default().fallback_window
}

fn default_fallback_step() -> Duration {
    GroundTrackOptions::default().fallback_step
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrbitTraceConfig {
    #[serde(default = "default_points")]
    pub points: usize,
}

impl Default for OrbitTraceConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
        }
    }
}

fn default_points() -> usize {
    DEFAULT_POINT_COUNT
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            active_only: default_active_only(),
        }
    }
}

fn default_active_only() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn ground_track_options(&self) -> GroundTrackOptions {
        GroundTrackOptions {
            step: self.ground_track.step,
            fallback_window: self.ground_track.fallback_window,
            fallback_step: self.ground_track.fallback_step,
        }
    }

    pub fn filter_engine(&self) -> FilterEngine {
        if self.filter.active_only {
            FilterEngine::active_only()
        } else {
            FilterEngine::default()
        }
    }
}

/// Human-readable durations such as `30s` or `6h`.
fn duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}
