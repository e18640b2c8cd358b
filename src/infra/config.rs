//! Configuration loading from TOML files
//!
//! All sections are optional; a missing or unreadable file falls back to
//! defaults that match the original deployment (MediaPipe left-arm
//! landmarks, 0.5 classifier threshold, 1 s feedback flash, top-10 board).

use crate::domain::types::LandmarkIndices;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct LandmarksConfig {
    #[serde(default = "default_shoulder_index")]
    pub shoulder: usize,
    #[serde(default = "default_elbow_index")]
    pub elbow: usize,
    #[serde(default = "default_wrist_index")]
    pub wrist: usize,
}

fn default_shoulder_index() -> usize {
    crate::domain::types::LEFT_SHOULDER
}

fn default_elbow_index() -> usize {
    crate::domain::types::LEFT_ELBOW
}

fn default_wrist_index() -> usize {
    crate::domain::types::LEFT_WRIST
}

impl Default for LandmarksConfig {
    fn default() -> Self {
        Self {
            shoulder: default_shoulder_index(),
            elbow: default_elbow_index(),
            wrist: default_wrist_index(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Probability above which a frame reads as "up"
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { threshold: default_threshold() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CounterConfig {
    /// Lifetime of the rep-counted flash message (ms)
    #[serde(default = "default_feedback_ttl_ms")]
    pub feedback_ttl_ms: u64,
}

fn default_feedback_ttl_ms() -> u64 {
    1000
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { feedback_ttl_ms: default_feedback_ttl_ms() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    /// Number of entries in live top-N snapshots
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    10
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { top_n: default_top_n() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory for sample export files
    #[serde(default = "default_export_dir")]
    pub dir: String,
}

fn default_export_dir() -> String {
    "exports".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { dir: default_export_dir() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub landmarks: LandmarksConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Main configuration struct used throughout the crate
#[derive(Debug, Clone)]
pub struct Config {
    landmark_indices: LandmarkIndices,
    classifier_threshold: f64,
    feedback_ttl_ms: u64,
    leaderboard_top_n: usize,
    export_dir: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            landmark_indices: LandmarkIndices::default(),
            classifier_threshold: default_threshold(),
            feedback_ttl_ms: default_feedback_ttl_ms(),
            leaderboard_top_n: default_top_n(),
            export_dir: default_export_dir(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            landmark_indices: LandmarkIndices {
                shoulder: toml_config.landmarks.shoulder,
                elbow: toml_config.landmarks.elbow,
                wrist: toml_config.landmarks.wrist,
            },
            classifier_threshold: toml_config.classifier.threshold,
            feedback_ttl_ms: toml_config.counter.feedback_ttl_ms,
            leaderboard_top_n: toml_config.leaderboard.top_n,
            export_dir: toml_config.export.dir,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to
    /// defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn landmark_indices(&self) -> LandmarkIndices {
        self.landmark_indices
    }

    pub fn classifier_threshold(&self) -> f64 {
        self.classifier_threshold
    }

    pub fn feedback_ttl_ms(&self) -> u64 {
        self.feedback_ttl_ms
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_millis(self.feedback_ttl_ms)
    }

    pub fn leaderboard_top_n(&self) -> usize {
        self.leaderboard_top_n
    }

    pub fn export_dir(&self) -> &str {
        &self.export_dir
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
