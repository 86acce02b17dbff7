// src/config.rs

//! Configuration for the hashart binary.
//!
//! Deserialized from a JSON file; every field has a sensible default so a
//! partial (or absent) file works.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

/// The complete configuration: canvas defaults plus the piece toggle list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default canvas dimensions.
    pub canvas: CanvasConfig,
    /// Piece enablement.
    pub pieces: PiecesConfig,
}

/// Default render dimensions when the caller does not pass any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // The reference dimension the original artwork was tuned at.
        Self {
            width: 1320,
            height: 1320,
        }
    }
}

/// Which pieces are enabled. `None` means the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PiecesConfig {
    pub enabled: Option<Vec<String>>,
}

impl Config {
    /// Load from a JSON file, falling back to defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_reference_square() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 1320);
        assert_eq!(config.canvas.height, 1320);
        assert!(config.pieces.enabled.is_none());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"pieces": {"enabled": ["circles"]}}"#).unwrap();
        assert_eq!(config.canvas.width, 1320);
        assert_eq!(config.pieces.enabled, Some(vec!["circles".to_string()]));
    }
}
