use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

use crate::error::WttrError;

pub const DEFAULT_MAIN_INDICATOR: &str = "temp_C";
pub const DEFAULT_DATE_FORMAT: &str = "%A %b %d";

/// Unit system used for temperatures and wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Metric ("SI").
    #[default]
    Si,
    /// Imperial ("USCS").
    Uscs,
}

impl Unit {
    /// Imperial is chosen when asked for explicitly or when the main
    /// indicator itself is the Fahrenheit temperature.
    pub fn resolve(fahrenheit: bool, main_indicator: &str) -> Self {
        if fahrenheit || main_indicator == "temp_F" { Unit::Uscs } else { Unit::Si }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Si => "SI",
            Unit::Uscs => "USCS",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = WttrError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SI" => Ok(Unit::Si),
            "USCS" => Ok(Unit::Uscs),
            other => Err(WttrError::InvalidUnit(other.to_string())),
        }
    }
}

/// Global output verbosity: text only, icon only, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    Text = 1,
    #[default]
    Icon = 2,
    TextIcon = 3,
}

impl TryFrom<u8> for FormatType {
    type Error = WttrError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FormatType::Text),
            2 => Ok(FormatType::Icon),
            3 => Ok(FormatType::TextIcon),
            other => Err(WttrError::InvalidInput(format!(
                "Invalid format type ({other}) was passed. Expected 1, 2 or 3."
            ))),
        }
    }
}

/// Everything a single run needs to know about presentation.
///
/// Built once by the CLI and only ever shared by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub unit: Unit,
    pub ampm: bool,
    pub main_indicator: String,
    pub custom_indicator: Option<String>,
    pub date_format: String,
    pub format_type: FormatType,
    pub hour_text_only: bool,
    pub plain_text: bool,
    pub hide_wind_details: bool,
    pub hide_conditions: bool,
    pub show_temp_unit: bool,
    /// Max condition chances listed per hour; 0 means all.
    pub max_conditions: usize,
    pub vertical_view: bool,
    pub emoji: bool,
    pub neutral_icon: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: Unit::Si,
            ampm: false,
            main_indicator: DEFAULT_MAIN_INDICATOR.to_string(),
            custom_indicator: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            format_type: FormatType::Icon,
            hour_text_only: false,
            plain_text: false,
            hide_wind_details: false,
            hide_conditions: false,
            show_temp_unit: false,
            max_conditions: 0,
            vertical_view: false,
            emoji: false,
            neutral_icon: false,
        }
    }
}

/// Defaults stored on disk. Each field mirrors a command-line flag.
///
/// Example TOML:
/// location = "Paris"
/// fahrenheit = true
/// format_type = 3
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub location: Option<String>,
    pub ampm: bool,
    pub main_indicator: Option<String>,
    pub custom_indicator: Option<String>,
    pub date_format: Option<String>,
    pub hide_conditions: bool,
    pub hide_wind_details: bool,
    pub max_conditions: Option<usize>,
    pub fahrenheit: bool,
    pub vertical_view: bool,
    pub format_type: Option<u8>,
    pub hour_text_only: bool,
    pub emoji: bool,
    pub neutral_icon: bool,
    pub plain_text: bool,
    pub show_temp_unit: bool,

    /// Replacement for the built-in icon table.
    pub icons_path: Option<PathBuf>,
    /// Replacement for the built-in emoji table.
    pub emojis_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the platform config dir, or empty settings if
    /// there is no file yet.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            log::debug!("no settings file at {}", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load settings from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Path to the config file.
    pub fn config_file_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wttrbar", "wttrbar")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_prefers_fahrenheit_flag() {
        assert_eq!(Unit::resolve(true, "temp_C"), Unit::Uscs);
        assert_eq!(Unit::resolve(false, "temp_C"), Unit::Si);
    }

    #[test]
    fn unit_follows_fahrenheit_main_indicator() {
        assert_eq!(Unit::resolve(false, "temp_F"), Unit::Uscs);
        assert_eq!(Unit::resolve(false, "FeelsLikeF"), Unit::Si);
    }

    #[test]
    fn unit_parses_known_names_only() {
        assert_eq!("SI".parse::<Unit>().unwrap(), Unit::Si);
        assert_eq!("USCS".parse::<Unit>().unwrap(), Unit::Uscs);

        let err = "kelvin".parse::<Unit>().unwrap_err();
        assert!(matches!(err, WttrError::InvalidUnit(ref u) if u == "kelvin"));
    }

    #[test]
    fn format_type_accepts_one_to_three() {
        assert_eq!(FormatType::try_from(1).unwrap(), FormatType::Text);
        assert_eq!(FormatType::try_from(2).unwrap(), FormatType::Icon);
        assert_eq!(FormatType::try_from(3).unwrap(), FormatType::TextIcon);
        assert!(FormatType::try_from(0).is_err());
        assert!(FormatType::try_from(4).is_err());
    }

    #[test]
    fn settings_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "location = \"Paris\"\nfahrenheit = true\nformat_type = 3\nmax_conditions = 2\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.location.as_deref(), Some("Paris"));
        assert!(settings.fahrenheit);
        assert_eq!(settings.format_type, Some(3));
        assert_eq!(settings.max_conditions, Some(2));
        assert!(!settings.emoji);
    }

    #[test]
    fn settings_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn settings_reject_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
