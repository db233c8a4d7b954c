use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

use super::Formatter;
use crate::{
    config::Unit,
    error::{Result, WttrError},
    lookup::{self, Daylight, TimeOfDay},
    model::{Fragment, WeatherDocument},
};

/// Current-condition keys that hold a temperature.
const TEMP_KEYS: &[&str] = &["FeelsLikeC", "FeelsLikeF", "temp_C", "temp_F", "tempF", "tempC"];

// `$$`, `$name`, `${name}`, or a `$` that starts none of those.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\}|(?P<invalid>))")
        .expect("placeholder pattern is valid")
});

impl Formatter<'_> {
    /// The short string shown in the bar itself.
    pub fn text(&self, doc: &WeatherDocument) -> Result<String> {
        let current = doc.current()?;

        let time = if self.config.neutral_icon {
            TimeOfDay::Neutral
        } else {
            let astronomy = doc.today()?.astronomy()?;
            lookup::time_of_day(false, Daylight::Astronomy(astronomy), self.now.time())?
        };

        let icon = lookup::weather_icon_for(
            self.glyphs,
            &current.require("weatherCode")?,
            time,
            self.config.emoji,
        )?;

        if let Some(template) = self.config.custom_indicator.as_deref().filter(|t| !t.is_empty()) {
            return substitute(template, current, icon);
        }

        let value = self.main_indicator(current)?;

        Ok(if self.config.vertical_view { format!("{icon}\n{value}") } else { format!("{icon} {value}") })
    }

    /// Key actually read for the main indicator. A Celsius indicator is
    /// swapped for its Fahrenheit twin under imperial units.
    fn indicator_key(&self) -> &str {
        let key = self.config.main_indicator.as_str();
        if key == "temp_C" && self.config.unit == Unit::Uscs { "temp_F" } else { key }
    }

    fn main_indicator(&self, current: &Fragment) -> Result<String> {
        let key = self.indicator_key();
        let raw = current.get(key).ok_or_else(|| WttrError::KeyNotFound(key.to_string()))?;

        if TEMP_KEYS.contains(&key) { self.temperature(&raw) } else { Ok(raw.into_owned()) }
    }
}

/// Fills a `$name` / `${name}` template from the current conditions, with
/// `icon` bound to the weather glyph.
fn substitute(template: &str, current: &Fragment, icon: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        out.push_str(&template[last..whole.start]);
        out.push_str(&resolve(&caps, template, whole.start, current, icon)?);
        last = whole.end;
    }

    out.push_str(&template[last..]);
    Ok(out)
}

fn resolve<'a>(
    caps: &Captures<'_>,
    template: &str,
    at: usize,
    current: &'a Fragment,
    icon: &'a str,
) -> Result<Cow<'a, str>> {
    if caps.name("escaped").is_some() {
        return Ok(Cow::Borrowed("$"));
    }

    let Some(name) = caps.name("named").or_else(|| caps.name("braced")).map(|m| m.as_str()) else {
        let rest: String = template[at..].chars().take(8).collect();
        return Err(WttrError::InvalidPlaceholder(format!("'{rest}' at position {at}")));
    };

    if name == "icon" {
        return Ok(Cow::Borrowed(icon));
    }

    current.get(name).ok_or_else(|| WttrError::InvalidPlaceholder(name.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{Config, Unit},
        error::WttrError,
        format::{Formatter, testing},
        glyphs::Glyphs,
    };

    fn text(config: &Config, hour: u32) -> Result<String, WttrError> {
        let g = Glyphs::builtin().unwrap();
        Formatter::at(config, &g, testing::at(hour, 0)).text(&testing::document())
    }

    #[test]
    fn default_shows_icon_and_celsius() {
        let cfg = Config { emoji: true, ..Config::default() };
        assert_eq!(text(&cfg, 12).unwrap(), "⛅ 20°");
    }

    #[test]
    fn night_uses_night_variant() {
        let cfg = Config { emoji: true, ..Config::default() };
        assert_eq!(text(&cfg, 23).unwrap(), "☁️ 20°");
    }

    #[test]
    fn imperial_swaps_celsius_indicator() {
        let cfg = Config {
            unit: Unit::Uscs,
            main_indicator: "temp_C".into(),
            emoji: true,
            ..Config::default()
        };

        assert_eq!(text(&cfg, 12).unwrap(), "⛅ 68°");
        assert_eq!(cfg.main_indicator, "temp_C");
    }

    #[test]
    fn temperature_unit_and_vertical_layout() {
        let cfg = Config {
            emoji: true,
            show_temp_unit: true,
            vertical_view: true,
            main_indicator: "FeelsLikeC".into(),
            ..Config::default()
        };

        assert_eq!(text(&cfg, 12).unwrap(), "⛅\n19°C");
    }

    #[test]
    fn non_temperature_indicator_is_raw() {
        let cfg = Config { emoji: true, main_indicator: "humidity".into(), ..Config::default() };
        assert_eq!(text(&cfg, 12).unwrap(), "⛅ 71");
    }

    #[test]
    fn unknown_indicator_is_key_not_found() {
        let cfg = Config { main_indicator: "dewpoint".into(), ..Config::default() };
        let err = text(&cfg, 12).unwrap_err();
        assert!(matches!(err, WttrError::KeyNotFound(ref k) if k == "dewpoint"));
    }

    #[test]
    fn custom_template_is_returned_verbatim() {
        let cfg = Config {
            emoji: true,
            vertical_view: true,
            custom_indicator: Some("$icon ${temp_C}°C $$ $weatherDesc".into()),
            ..Config::default()
        };

        assert_eq!(text(&cfg, 12).unwrap(), "⛅ 20°C $ Partly cloudy");
    }

    #[test]
    fn custom_template_names_missing_placeholder() {
        let cfg = Config { custom_indicator: Some("$icon $dewpoint".into()), ..Config::default() };
        let err = text(&cfg, 12).unwrap_err();

        assert!(matches!(err, WttrError::InvalidPlaceholder(ref k) if k == "dewpoint"));
        assert!(err.to_string().contains("dewpoint"));
    }

    #[test]
    fn dangling_dollar_is_invalid() {
        let cfg = Config { custom_indicator: Some("cost: $5".into()), ..Config::default() };
        assert!(matches!(text(&cfg, 12), Err(WttrError::InvalidPlaceholder(_))));
    }

    #[test]
    fn empty_template_falls_back_to_indicator() {
        let cfg = Config { emoji: true, custom_indicator: Some(String::new()), ..Config::default() };
        assert_eq!(text(&cfg, 12).unwrap(), "⛅ 20°");
    }

    #[test]
    fn neutral_icon_ignores_daylight() {
        let g = Glyphs::builtin().unwrap();
        let cfg = Config { neutral_icon: true, ..Config::default() };
        let expected = format!("{} 20°", g.icons().get("cloudy.neutral").unwrap());
        assert_eq!(text(&cfg, 23).unwrap(), expected);
    }
}
