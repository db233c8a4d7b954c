use std::path::PathBuf;

use clap::Parser;
use wttrbar_core::{
    Config, Endpoint, FormatType, Glyphs, Settings, Unit, WttrProvider, config, render,
};

/// Top-level CLI struct. Every option can also be set in the config file;
/// flags given here win.
#[derive(Debug, Parser)]
#[command(
    name = "wttrbar",
    version,
    about = "A highly customizable weather module for Waybar"
)]
pub struct Cli {
    /// Show time in AM/PM format.
    #[arg(long)]
    pub ampm: bool,

    /// Location to report on. Defaults to your current location.
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Current-conditions key shown on the bar.
    #[arg(long)]
    pub main_indicator: Option<String>,

    /// Custom bar text, e.g. "$icon $temp_C".
    #[arg(long)]
    pub custom_indicator: Option<String>,

    /// strftime pattern for the forecast dates.
    #[arg(long)]
    pub date_format: Option<String>,

    /// Hide condition chances next to each hour ("20° Cloudy" instead of
    /// "20° Cloudy, Overcast 81%, Sunshine 13%").
    #[arg(long)]
    pub hide_conditions: bool,

    /// Remove wind direction and degree.
    #[arg(long)]
    pub hide_wind_details: bool,

    /// Limit the condition chances shown per hour; 0 shows all.
    #[arg(long)]
    pub max_conditions: Option<usize>,

    /// Use fahrenheit instead of celsius.
    #[arg(long, short = 'f')]
    pub fahrenheit: bool,

    /// Icon on the first line and the value on a second one.
    #[arg(long)]
    pub vertical_view: bool,

    /// Output format: 1 text only, 2 icon/emoji only, 3 both.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub format_type: Option<u8>,

    /// Show hours as text only.
    #[arg(long)]
    pub hour_text_only: bool,

    /// Replace icons with emojis.
    #[arg(long)]
    pub emoji: bool,

    /// Show neutral icons instead of daytime/nighttime ones.
    #[arg(long)]
    pub neutral_icon: bool,

    /// Plain tooltip text without Pango markup or the JSON envelope.
    #[arg(long)]
    pub plain_text: bool,

    /// Show temperatures with their unit, like 20°C.
    #[arg(long)]
    pub show_temp_unit: bool,

    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fetch from a local server on port 8000 instead of wttr.in.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn settings(&self) -> anyhow::Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }

    /// Combine flags with file settings into the run's immutable config.
    pub fn to_config(&self, settings: &Settings) -> anyhow::Result<Config> {
        let main_indicator = self
            .main_indicator
            .clone()
            .or_else(|| settings.main_indicator.clone())
            .unwrap_or_else(|| config::DEFAULT_MAIN_INDICATOR.to_string());

        let format_type = match self.format_type.or(settings.format_type) {
            Some(ordinal) => FormatType::try_from(ordinal)?,
            None => FormatType::default(),
        };

        Ok(Config {
            unit: Unit::resolve(self.fahrenheit || settings.fahrenheit, &main_indicator),
            ampm: self.ampm || settings.ampm,
            main_indicator,
            custom_indicator: self.custom_indicator.clone().or_else(|| settings.custom_indicator.clone()),
            date_format: self
                .date_format
                .clone()
                .or_else(|| settings.date_format.clone())
                .unwrap_or_else(|| config::DEFAULT_DATE_FORMAT.to_string()),
            format_type,
            hour_text_only: self.hour_text_only || settings.hour_text_only,
            plain_text: self.plain_text || settings.plain_text,
            hide_wind_details: self.hide_wind_details || settings.hide_wind_details,
            hide_conditions: self.hide_conditions || settings.hide_conditions,
            show_temp_unit: self.show_temp_unit || settings.show_temp_unit,
            max_conditions: self.max_conditions.or(settings.max_conditions).unwrap_or(0),
            vertical_view: self.vertical_view || settings.vertical_view,
            emoji: self.emoji || settings.emoji,
            neutral_icon: self.neutral_icon || settings.neutral_icon,
        })
    }

    pub fn location(&self, settings: &Settings) -> String {
        self.location.clone().or_else(|| settings.location.clone()).unwrap_or_default()
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        let config = self.to_config(&settings)?;
        let glyphs = Glyphs::load(settings.icons_path.as_deref(), settings.emojis_path.as_deref())?;
        let provider = WttrProvider::new(Endpoint::from_debug_flag(self.debug))?;
        log::debug!("unit {}, format type {:?}", config.unit, config.format_type);

        let output = render(&provider, &self.location(&settings), &config, &glyphs).await?;
        println!("{}", output.to_json()?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wttrbar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_settings() {
        let cfg = parse(&[]).to_config(&Settings::default()).unwrap();

        assert_eq!(cfg.unit, Unit::Si);
        assert_eq!(cfg.main_indicator, "temp_C");
        assert_eq!(cfg.date_format, "%A %b %d");
        assert_eq!(cfg.format_type, FormatType::Icon);
        assert_eq!(cfg.max_conditions, 0);
        assert!(cfg.custom_indicator.is_none());
        assert!(!cfg.emoji);
    }

    #[test]
    fn fahrenheit_flag_selects_imperial() {
        let cfg = parse(&["-f"]).to_config(&Settings::default()).unwrap();
        assert_eq!(cfg.unit, Unit::Uscs);
        assert_eq!(cfg.main_indicator, "temp_C");
    }

    #[test]
    fn fahrenheit_indicator_selects_imperial() {
        let cfg = parse(&["--main-indicator", "temp_F"]).to_config(&Settings::default()).unwrap();
        assert_eq!(cfg.unit, Unit::Uscs);
    }

    #[test]
    fn flags_win_over_settings() {
        let settings = Settings {
            location: Some("Paris".into()),
            format_type: Some(1),
            max_conditions: Some(4),
            date_format: Some("%d/%m".into()),
            emoji: true,
            ..Settings::default()
        };
        let cli = parse(&["--format-type", "3", "-l", "Oslo", "--max-conditions", "2"]);
        let cfg = cli.to_config(&settings).unwrap();

        assert_eq!(cfg.format_type, FormatType::TextIcon);
        assert_eq!(cfg.max_conditions, 2);
        assert_eq!(cfg.date_format, "%d/%m");
        assert!(cfg.emoji);
        assert_eq!(cli.location(&settings), "Oslo");
        assert_eq!(parse(&[]).location(&settings), "Paris");
        assert_eq!(parse(&[]).location(&Settings::default()), "");
    }

    #[test]
    fn settings_fahrenheit_applies() {
        let settings = Settings { fahrenheit: true, ..Settings::default() };
        assert_eq!(parse(&[]).to_config(&settings).unwrap().unit, Unit::Uscs);
    }

    #[test]
    fn out_of_range_format_type_is_rejected() {
        let args = ["wttrbar", "--format-type", "4"];
        assert!(Cli::try_parse_from(args).is_err());

        let settings = Settings { format_type: Some(9), ..Settings::default() };
        assert!(parse(&[]).to_config(&settings).is_err());
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wttrbar.toml");
        std::fs::write(&path, "emoji = true\nmain_indicator = \"humidity\"\n").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap()]);
        let cfg = cli.to_config(&cli.settings().unwrap()).unwrap();

        assert!(cfg.emoji);
        assert_eq!(cfg.main_indicator, "humidity");
    }

    #[test]
    fn missing_explicit_config_file_is_fatal() {
        let cli = parse(&["--config", "/definitely/not/here.toml"]);
        assert!(cli.settings().is_err());
    }
}
