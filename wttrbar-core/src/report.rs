use std::borrow::Cow;

use chrono::NaiveTime;

use crate::{
    config::{Config, Unit},
    error::Result,
    glyphs::Glyphs,
    lookup::{self, Daylight},
    model::Fragment,
};

const NOT_AVAILABLE: &str = "N/A";

/// Normalized view of one conditions fragment in the configured units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefReport {
    pub temp: String,
    pub feels_like: String,
    pub wind_speed: String,
    pub icon: String,
    pub description: String,
}

impl BriefReport {
    /// `daylight` decides the icon variant unless neutral icons are configured.
    pub fn new(
        data: &Fragment,
        config: &Config,
        glyphs: &Glyphs,
        daylight: Daylight<'_>,
        now: NaiveTime,
    ) -> Result<Self> {
        // wind keys are crossed over, same as the tooltip wind line
        let (temp_keys, feels_like_key, wind_key) = match config.unit {
            Unit::Uscs => (["tempF", "temp_F"], "FeelsLikeF", "windspeedKmph"),
            Unit::Si => (["tempC", "temp_C"], "FeelsLikeC", "windspeedMiles"),
        };

        let time = lookup::time_of_day(config.neutral_icon, daylight, now)?;
        let icon =
            lookup::weather_icon_for(glyphs, &data.require("weatherCode")?, time, config.emoji)?;

        Ok(Self {
            temp: or_na(data.first_of(&temp_keys)),
            feels_like: or_na(data.get(feels_like_key)),
            wind_speed: or_na(data.get(wind_key)),
            icon: icon.to_string(),
            description: data.description()?.into_owned(),
        })
    }
}

fn or_na(value: Option<Cow<'_, str>>) -> String {
    value.map(Cow::into_owned).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lookup::TimeOfDay, model::Astronomy};
    use serde_json::json;

    fn current() -> Fragment {
        serde_json::from_value(json!({
            "temp_C": "20", "temp_F": "68",
            "FeelsLikeC": "19", "FeelsLikeF": "66",
            "windspeedKmph": "11", "windspeedMiles": "7",
            "weatherCode": "113",
            "weatherDesc": [{ "value": "Sunny" }],
        }))
        .unwrap()
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn astronomy() -> Astronomy {
        Astronomy {
            sunrise: "06:00 AM".into(),
            sunset: "08:00 PM".into(),
            moon_phase: "New Moon".into(),
        }
    }

    #[test]
    fn metric_report_reads_celsius_fields() {
        let g = Glyphs::builtin().unwrap();
        let cfg = Config { emoji: true, ..Config::default() };
        let astro = astronomy();

        let r = BriefReport::new(&current(), &cfg, &g, Daylight::Astronomy(&astro), noon()).unwrap();

        assert_eq!(r.temp, "20");
        assert_eq!(r.feels_like, "19");
        assert_eq!(r.wind_speed, "7");
        assert_eq!(r.icon, "☀️");
        assert_eq!(r.description, "Sunny");
    }

    #[test]
    fn imperial_report_reads_fahrenheit_fields() {
        let g = Glyphs::builtin().unwrap();
        let cfg = Config { unit: Unit::Uscs, ..Config::default() };
        let astro = astronomy();

        let r = BriefReport::new(&current(), &cfg, &g, Daylight::Astronomy(&astro), noon()).unwrap();

        assert_eq!(r.temp, "68");
        assert_eq!(r.feels_like, "66");
        assert_eq!(r.wind_speed, "11");
    }

    #[test]
    fn hourly_spelling_and_missing_values() {
        let g = Glyphs::builtin().unwrap();
        let cfg = Config { emoji: true, ..Config::default() };
        let hour: Fragment = serde_json::from_value(json!({
            "time": "2100", "tempC": "14",
            "weatherCode": "113",
            "weatherDesc": [{ "value": "Clear" }],
        }))
        .unwrap();

        let r = BriefReport::new(&hour, &cfg, &g, Daylight::Hour("2100"), noon()).unwrap();

        assert_eq!(r.temp, "14");
        assert_eq!(r.feels_like, "N/A");
        assert_eq!(r.icon, "🌙");
    }

    #[test]
    fn neutral_icon_skips_daylight_check() {
        let g = Glyphs::builtin().unwrap();
        let cfg = Config { neutral_icon: true, ..Config::default() };

        let r = BriefReport::new(&current(), &cfg, &g, Daylight::Hour("bogus"), noon()).unwrap();

        assert_eq!(r.icon, g.icons().get(&format!("clear.{}", TimeOfDay::Neutral.as_str())).unwrap());
    }
}
