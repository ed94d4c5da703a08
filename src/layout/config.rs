//! Layout configuration loader and validator
//!
//! Describes which inputs a controller has and how each is constructed:
//! value ranges and inversion per axis, debounce interval per button.
//! Loaded from TOML files in the configs/ directory.

use crate::input::range::ValueRange;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete controller layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub buttons: Vec<ButtonLayout>,

    #[serde(default)]
    pub sticks: Vec<StickLayout>,

    #[serde(default)]
    pub triggers: Vec<TriggerLayout>,

    /// Directional pad, if the controller has one
    #[serde(default)]
    pub dpad: Option<DpadLayout>,
}

/// Layout-wide defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Debounce interval applied to buttons without their own value
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    crate::input::DEFAULT_DEBOUNCE.as_millis() as u64
}

/// Plain digital button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonLayout {
    pub name: String,

    /// Overrides `settings.debounce_ms`
    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

/// Single axis construction parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    #[serde(default)]
    pub range: ValueRange,

    #[serde(default)]
    pub inverted: bool,
}

/// Two-axis stick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickLayout {
    pub name: String,

    #[serde(default)]
    pub x: AxisLayout,

    #[serde(default)]
    pub y: AxisLayout,

    /// Stick can be clicked
    #[serde(default)]
    pub pressable: bool,

    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

/// Pressure-sensitive trigger with its own digital button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerLayout {
    pub name: String,

    #[serde(default)]
    pub x: AxisLayout,

    #[serde(default)]
    pub y: AxisLayout,

    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DpadLayout {
    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

impl LayoutConfig {
    /// Load a layout from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading layout from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        Self::from_toml_str(&content)
    }

    /// Load the default layout from configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate a layout held in memory
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(content)?;

        debug!("  - Buttons: {}", config.buttons.len());
        debug!("  - Sticks: {}", config.sticks.len());
        debug!("  - Triggers: {}", config.triggers.len());
        debug!("  - D-pad: {}", config.dpad.is_some());

        config.validate()?;
        info!("✓ Layout validation passed");

        Ok(config)
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buttons.is_empty() && self.sticks.is_empty() && self.triggers.is_empty() && self.dpad.is_none() {
            return Err(ConfigError::Invalid("Layout declares no inputs".into()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let names = self
            .buttons
            .iter()
            .map(|b| b.name.as_str())
            .chain(self.sticks.iter().map(|s| s.name.as_str()))
            .chain(self.triggers.iter().map(|t| t.name.as_str()));

        for name in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("Input names must not be empty".into()));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Invalid(format!("Duplicate input name '{}'", name)));
            }
        }

        if self.settings.debounce_ms == 0 {
            warn!("Debounce disabled: settings.debounce_ms is 0");
        }

        Ok(())
    }

    /// Effective debounce interval for an input with an optional override
    pub fn debounce_for(&self, debounce_ms: Option<u64>) -> Duration {
        Duration::from_millis(debounce_ms.unwrap_or(self.settings.debounce_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(name: &str) -> ButtonLayout {
        ButtonLayout {
            name: name.to_string(),
            debounce_ms: None,
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.debounce_ms, 100);
    }

    #[test]
    fn test_valid_config_minimal() {
        let config = LayoutConfig {
            buttons: vec![button("a")],
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_layout_rejected() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dpad_only_layout_is_valid() {
        let config = LayoutConfig {
            dpad: Some(DpadLayout::default()),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_names_across_kinds() {
        let config = LayoutConfig {
            buttons: vec![button("left_stick")],
            sticks: vec![StickLayout {
                name: "left_stick".to_string(),
                x: AxisLayout::default(),
                y: AxisLayout::default(),
                pressable: true,
                debounce_ms: None,
            }],
            ..LayoutConfig::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate input name"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let config = LayoutConfig {
            buttons: vec![button("  ")],
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debounce_override() {
        let config = LayoutConfig {
            settings: Settings { debounce_ms: 80 },
            buttons: vec![button("a")],
            ..LayoutConfig::default()
        };
        assert_eq!(config.debounce_for(None), Duration::from_millis(80));
        assert_eq!(config.debounce_for(Some(5)), Duration::from_millis(5));
    }

    #[test]
    fn test_parse_axis_defaults() {
        let config = LayoutConfig::from_toml_str(
            r#"
            [[sticks]]
            name = "left_stick"
            y = { inverted = true }
            "#,
        )
        .unwrap();

        let stick = &config.sticks[0];
        assert_eq!(stick.x, AxisLayout::default());
        assert!(stick.y.inverted);
        assert_eq!(stick.y.range, ValueRange::default());
        assert!(!stick.pressable);
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let result = LayoutConfig::from_toml_str(
            r#"
            [[triggers]]
            name = "lt"
            y = { range = [255, 0] }
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_zero_width_range() {
        let result = LayoutConfig::from_toml_str(
            r#"
            [[sticks]]
            name = "s"
            x = { range = [10, 10] }
            "#,
        );
        assert!(result.is_err());
    }
}
