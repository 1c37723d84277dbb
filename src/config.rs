//! Configuration management for focuswatch
//!
//! Provides configuration loading, saving, and validation for frame
//! dimensions, target cycle rate, and the blur threshold.

use crate::errors::FocusError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default target cycle rate (cycles per second)
pub const DEFAULT_FPS: u32 = 15;

/// Default frame dimensions [width, height]
pub const DEFAULT_RESOLUTION: [u32; 2] = [640, 480];

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusWatchConfig {
    pub capture: CaptureConfig,
    pub analysis: AnalysisConfig,
}

/// Frame capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Frame dimensions [width, height], fixed for the run
    pub resolution: [u32; 2],
    /// Target measurement cycles per second
    pub fps: u32,
}

/// Sharpness analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Scores at or below this are classified as blurred
    pub blur_threshold: i64,
}

impl Default for FocusWatchConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig {
                resolution: DEFAULT_RESOLUTION,
                fps: DEFAULT_FPS,
            },
            analysis: AnalysisConfig {
                blur_threshold: crate::classify::DEFAULT_BLUR_THRESHOLD,
            },
        }
    }
}

impl FocusWatchConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FocusError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            FocusError::InvalidConfig(format!("Failed to read config file: {}", e))
        })?;

        let config: FocusWatchConfig = toml::from_str(&contents).map_err(|e| {
            FocusError::InvalidConfig(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FocusError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FocusError::InvalidConfig(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            FocusError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            FocusError::InvalidConfig(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("focuswatch.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.capture.resolution[0] == 0 || self.capture.resolution[1] == 0 {
            return Err("Invalid resolution (dimensions must be non-zero)".to_string());
        }
        if self.capture.fps == 0 || self.capture.fps > 240 {
            return Err("Invalid FPS (must be 1-240)".to_string());
        }
        if self.analysis.blur_threshold < 0 {
            return Err("Blur threshold must be non-negative".to_string());
        }
        Ok(())
    }
}
