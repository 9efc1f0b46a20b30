// Kbdlayer Settings Module
// User settings for the harness binaries

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transform::TransformConfig;

/// Settings shared by the `kbdlayer` harness binaries
///
/// These settings are loaded from a TOML file (default:
/// ~/.config/kbdlayer/settings.toml). Command-line flags win over them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Layout descriptor to load
    layout_path: Option<PathBuf>,

    /// Pending dead-key timeout; `None` disables it
    dead_key_timeout: Option<Duration>,

    /// Echo the key code of unmapped keys
    passthrough_unmapped: bool,

    /// Print the active layer next to each output
    show_layer: bool,

    /// Settings file this was read from; relative layout paths start here
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    layout: Option<LayoutSettings>,

    #[serde(default)]
    deadkeys: Option<DeadKeySettings>,

    #[serde(default)]
    output: Option<OutputSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LayoutSettings {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DeadKeySettings {
    #[serde(default)]
    timeout_ms: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct OutputSettings {
    #[serde(default)]
    passthrough_unmapped: Option<toml::Value>,

    #[serde(default)]
    show_layer: Option<toml::Value>,
}

impl Settings {
    /// Create a new empty settings object
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(layout) = toml_settings.layout {
            settings.layout_path = layout.path;
        }

        if let Some(deadkeys) = toml_settings.deadkeys {
            if let Some(value) = deadkeys.timeout_ms {
                let ms = parse_millis_value(&value)?;
                settings.dead_key_timeout = (ms > 0).then(|| Duration::from_millis(ms));
            }
        }

        if let Some(output) = toml_settings.output {
            if let Some(value) = output.passthrough_unmapped {
                settings.passthrough_unmapped = parse_bool_value(&value)?;
            }
            if let Some(value) = output.show_layer {
                settings.show_layer = parse_bool_value(&value)?;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kbdlayer").join("settings.toml"))
    }

    /// Load from default location (~/.config/kbdlayer/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Layout path, resolved against the settings file's directory when relative
    pub fn layout_path(&self) -> Option<PathBuf> {
        let path = self.layout_path.as_ref()?;
        match (&self.source_path, path.is_relative()) {
            (Some(source), true) => source.parent().map(|dir| dir.join(path)),
            _ => Some(path.clone()),
        }
    }

    pub fn dead_key_timeout(&self) -> Option<Duration> {
        self.dead_key_timeout
    }

    pub fn passthrough_unmapped(&self) -> bool {
        self.passthrough_unmapped
    }

    pub fn set_passthrough_unmapped(&mut self, value: bool) {
        self.passthrough_unmapped = value;
    }

    pub fn show_layer(&self) -> bool {
        self.show_layer
    }

    pub fn set_show_layer(&mut self, value: bool) {
        self.show_layer = value;
    }

    /// Engine configuration derived from these settings
    pub fn to_transform_config(&self) -> TransformConfig {
        TransformConfig {
            dead_key_timeout: self.dead_key_timeout,
        }
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Parse a TOML value as a non-negative millisecond count
fn parse_millis_value(value: &toml::Value) -> Result<u64, SettingsError> {
    match value {
        toml::Value::Integer(ms) if *ms >= 0 => Ok(*ms as u64),
        toml::Value::String(s) => s.trim().parse::<u64>().map_err(|_| {
            SettingsError::InvalidValue(format!("Cannot convert '{}' to milliseconds", s))
        }),
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to milliseconds",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Kbdlayer Settings
# Place this file at: ~/.config/kbdlayer/settings.toml

[layout]
# Layout descriptor (JSON, or TOML with a .toml extension)
# path = "layouts/se.json"

[deadkeys]
# Drop a pending dead key after this many milliseconds (0 = never)
timeout_ms = 0

[output]
# Echo the key code of keys the layout does not define
passthrough_unmapped = false
# Print the active layer next to each output
show_layer = false
"#
}
