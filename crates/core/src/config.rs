//! Session configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CoreError, Result};
use crate::overlay::GradientOverlay;

/// Configuration supplied before a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Target completions per hour
    pub rate_per_hour: u32,

    /// Ordered palette; index 0 is the "no progress" color
    pub palette: Vec<Color>,

    /// Emit periodic diagnostic observations
    pub logging: bool,

    /// Milliseconds between ticks
    pub tick_interval_ms: u64,

    /// Elapsed-second cadence of diagnostic observations
    pub diagnostic_every_seconds: u64,

    /// Optional constant overlay gradient
    pub overlay: Option<GradientOverlay>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rate_per_hour: 1,
            palette: vec![Color::CLEAR],
            logging: false,
            tick_interval_ms: 1000,
            diagnostic_every_seconds: 10,
            overlay: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&content)
    }

    /// Check the fields that have no meaningful zero value.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::InvalidConfig("tick_interval_ms must be > 0".into()));
        }
        if self.diagnostic_every_seconds == 0 {
            return Err(CoreError::InvalidConfig("diagnostic_every_seconds must be > 0".into()));
        }
        if let Some(overlay) = &self.overlay {
            overlay.validate()?;
        }
        Ok(())
    }

    /// Tick period as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Set the rate.
    pub fn with_rate(mut self, rate_per_hour: u32) -> Self {
        self.rate_per_hour = rate_per_hour;
        self
    }

    /// Set the palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Enable or disable diagnostics.
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Point;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.rate_per_hour, 1);
        assert_eq!(config.palette, vec![Color::CLEAR]);
        assert!(!config.logging);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.diagnostic_every_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SessionConfig::from_json_str(
            r#"{ "rate_per_hour": 80, "palette": ["green", "yellow", "orange", "red"] }"#,
        )
        .unwrap();
        assert_eq!(config.rate_per_hour, 80);
        assert_eq!(config.palette.len(), 4);
        assert_eq!(config.palette[3], Color::RED);
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn test_overlay_from_json() {
        let config = SessionConfig::from_json_str(
            r#"{
                "overlay": { "color": "gray", "position": { "x": 0.5, "y": 1.2 }, "locations": [0.75, 1.0] }
            }"#,
        )
        .unwrap();
        let overlay = config.overlay.unwrap();
        assert_eq!(overlay.color, Color::GRAY);
        assert_eq!(overlay.position, Point::new(0.5, 1.2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "tick_interval_ms": 0 }"#),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "palette": ["nope"] }"#),
            Err(CoreError::Json(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(
                r#"{ "overlay": { "color": "gray", "position": { "x": 0.5, "y": 1 }, "locations": [1.0, 0.5] } }"#
            ),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, r#"{ "rate_per_hour": 12, "logging": true }"#)
            .await
            .unwrap();

        let config = SessionConfig::load(&path).await.unwrap();
        assert_eq!(config.rate_per_hour, 12);
        assert!(config.logging);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SessionConfig::load(dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
