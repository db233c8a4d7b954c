//! Pure mappings from weather-domain values to glyph keys and labels.

use std::borrow::Cow;

use chrono::NaiveTime;

use crate::{
    error::{Result, WttrError},
    glyphs::Glyphs,
    model::Astronomy,
};

/// Which variant of a weather icon to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
    Neutral,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
            TimeOfDay::Neutral => "neutral",
        }
    }

    pub const fn all() -> &'static [TimeOfDay] {
        &[TimeOfDay::Day, TimeOfDay::Night, TimeOfDay::Neutral]
    }
}

/// How a weather code picks its glyph key.
#[derive(Debug, Clone, Copy)]
enum Pick {
    /// `<family>.<day|night|neutral>`
    Family(&'static str),
    /// Same key at any time of day.
    Fixed(&'static str),
    /// One key during the day, another at night or in neutral mode.
    DayOr { day: &'static str, otherwise: &'static str },
}

impl Pick {
    fn key(self, time: TimeOfDay) -> Cow<'static, str> {
        match self {
            Pick::Family(family) => Cow::Owned(format!("{family}.{}", time.as_str())),
            Pick::Fixed(key) => Cow::Borrowed(key),
            Pick::DayOr { day, otherwise } => {
                Cow::Borrowed(if time == TimeOfDay::Day { day } else { otherwise })
            }
        }
    }
}

const fn day_or(day: &'static str, otherwise: &'static str) -> Pick {
    Pick::DayOr { day, otherwise }
}

struct CodeGlyphs {
    code: u16,
    icon: Pick,
    emoji: Pick,
}

const fn code(code: u16, icon: Pick, emoji: Pick) -> CodeGlyphs {
    CodeGlyphs { code, icon, emoji }
}

use Pick::{Family, Fixed};

// https://www.worldweatheronline.com/weather-api/api/docs/weather-icons.aspx
const WEATHER_CODES: &[CodeGlyphs] = &[
    code(113, Family("clear"), day_or("sun", "moon.crescent")), // clear/sunny
    code(116, Family("cloudy"), day_or("sun-behind-cloud", "cloud")), // partly cloudy
    code(119, Family("cloudy"), Fixed("cloud")),
    code(122, day_or("overcast.day", "cloudy.night"), day_or("sun-behind-large-cloud", "cloud")),
    code(143, Family("fog"), Fixed("fog")), // mist
    code(176, Family("rain"), Fixed("rain-cloud")),
    code(179, Family("snow"), Fixed("snow-cloud")),
    code(182, Family("sleet"), Fixed("rain-cloud")),
    code(185, Family("rain-wind"), Fixed("rain-cloud")),
    code(200, Family("lightning"), Fixed("lightning-cloud")),
    code(227, Family("snow-wind"), Fixed("snow-cloud")), // blowing snow
    code(230, Family("snow-wind"), Fixed("snow-cloud")), // blizzard
    code(248, Family("fog"), Fixed("fog")),
    code(260, Family("fog"), Fixed("fog")), // freezing fog
    code(263, Family("rain"), Fixed("rain-cloud")),
    code(266, Family("rain"), Fixed("rain-cloud")),
    code(281, Family("rain-wind"), Fixed("rain-cloud")),
    code(284, Family("rain-mix"), Fixed("rain-cloud")),
    code(293, Family("rain"), day_or("sun-behind-rain-cloud", "rain-cloud")),
    code(296, Family("rain"), day_or("sun-behind-rain-cloud", "rain-cloud")),
    code(299, Family("rain-wind"), Fixed("rain-cloud")),
    code(302, Family("rain-wind"), Fixed("rain-cloud")),
    code(305, Family("rain-mix"), Fixed("rain-cloud")),
    code(308, Family("rain-mix"), Fixed("rain-cloud")),
    code(311, Fixed("rain.neutral"), Fixed("rain-cloud")), // light freezing rain
    code(314, Fixed("rain-mix.neutral"), Fixed("rain-cloud")),
    code(317, Family("sleet"), Fixed("rain-cloud")),
    code(320, Family("sleet"), Fixed("snow-cloud")),
    code(323, Family("snow"), Fixed("snow-cloud")),
    code(326, Family("snow"), Fixed("snow-cloud")),
    code(329, Family("snow-wind"), Fixed("snow-cloud")),
    code(332, Family("snow-wind"), Fixed("snow-cloud")),
    code(335, Family("snow-wind"), Fixed("snow-cloud")),
    code(338, Family("snow-wind"), Fixed("snow-cloud")),
    code(350, Fixed("snowflake.neutral"), Fixed("snowflake")), // ice pellets
    code(353, Family("showers"), Fixed("rain-cloud")),
    code(356, Family("showers"), Fixed("rain-cloud")),
    code(359, Family("rain-mix"), Fixed("rain-cloud")), // torrential
    code(362, Family("sleet"), Fixed("snow-cloud")),
    code(365, Family("sleet-storm"), Fixed("snow-cloud")),
    code(368, Family("snow-wind"), Fixed("snow-cloud")),
    code(371, Family("snow-wind"), Fixed("snow-cloud")),
    code(374, Fixed("snowflake.neutral"), Fixed("snowflake")),
    code(377, Fixed("snowflake.neutral"), Fixed("snowflake")),
    code(386, Family("lightning"), Fixed("lightning-cloud")),
    code(389, Family("thunderstorm"), Fixed("lightning-rain-cloud")),
    code(392, Family("snow-thunderstorm"), Fixed("snow-cloud")),
    code(395, Family("snow-thunderstorm"), Fixed("snow-cloud")),
];

const MOON_PHASES: &[(&str, &str)] = &[
    ("New Moon", "new"),
    ("Waxing Crescent", "waxing-crescent"),
    ("First Quarter", "first-quarter"),
    ("Waxing Gibbous", "waxing-gibbous"),
    ("Full Moon", "full"),
    ("Waning Gibbous", "waning-gibbous"),
    ("Last Quarter", "last-quarter"),
    ("Waning Crescent", "waning-crescent"),
];

const CLOCK_MARKS: &[&str] = &["0", "3", "6", "9"];

const WIND_DIRECTIONS: &[&str] =
    &["up", "up_right", "right", "down_right", "down", "down_left", "left", "up_left"];

/// Keys outside the lookup tables that formatters read directly.
const LAYOUT_KEYS: &[&str] = &["arrow.up", "arrow.down", "sunrise", "sunset"];
const ICON_ONLY_KEYS: &[&str] = &["location", "latitude", "longitude"];
const EMOJI_ONLY_KEYS: &[&str] = &["flag-in-hole", "degree"];

/// Every key the lookups and layouts may request from the icon table
/// (`emoji == false`) or the emoji table.
pub fn required_keys(emoji: bool) -> Vec<String> {
    let mut keys = Vec::new();

    for entry in WEATHER_CODES {
        let pick = if emoji { entry.emoji } else { entry.icon };
        keys.extend(TimeOfDay::all().iter().map(|t| pick.key(*t).into_owned()));
    }
    keys.extend(MOON_PHASES.iter().map(|(_, k)| format!("moon.{k}")));
    keys.extend(CLOCK_MARKS.iter().map(|m| format!("clock.{m}")));
    keys.extend(WIND_DIRECTIONS.iter().map(|d| format!("wind_dir.{d}")));
    keys.extend(LAYOUT_KEYS.iter().map(|k| k.to_string()));

    let extra = if emoji { EMOJI_ONLY_KEYS } else { ICON_ONLY_KEYS };
    keys.extend(extra.iter().map(|k| k.to_string()));

    keys
}

/// Numeric value of an hourly time code ("0", "300", ..., "2100").
pub fn parse_hour_code(hour: &str) -> Result<u32> {
    hour.trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h < 2400)
        .ok_or_else(|| WttrError::InvalidInput(format!("Invalid hour ({hour}) was passed.")))
}

/// Clock face for one of the eight three-hour marks.
pub fn clock_icon<'g>(glyphs: &'g Glyphs, hour: &str, emoji: bool) -> Result<&'g str> {
    let code = parse_hour_code(hour)?;
    if code % 300 != 0 {
        return Err(WttrError::InvalidInput(format!("Invalid hour ({hour}) was passed.")));
    }

    let mark = (code % 1200) / 100;
    glyphs.table(emoji).get(&format!("clock.{mark}"))
}

/// Octant name for a wind direction. Exact multiples of 90 point straight;
/// anything between two of them points diagonally.
pub fn wind_direction(degrees: i32) -> Result<&'static str> {
    let dir = match degrees {
        0 | 360 => "up",
        1..=89 => "up_right",
        90 => "right",
        91..=179 => "down_right",
        180 => "down",
        181..=269 => "down_left",
        270 => "left",
        271..=359 => "up_left",
        _ => {
            return Err(WttrError::InvalidInput(format!(
                "Invalid wind direction degree ({degrees}) was passed."
            )));
        }
    };

    Ok(dir)
}

pub fn wind_icon(glyphs: &Glyphs, degrees: i32, emoji: bool) -> Result<&str> {
    let dir = wind_direction(degrees)?;
    glyphs.table(emoji).get(&format!("wind_dir.{dir}"))
}

/// Glyph for a wttr.in weather code.
pub fn weather_icon(glyphs: &Glyphs, code: u16, time: TimeOfDay, emoji: bool) -> Result<&str> {
    let entry = WEATHER_CODES.iter().find(|e| e.code == code).ok_or_else(|| {
        WttrError::InvalidInput(format!("Invalid weather code ({code}) was passed."))
    })?;

    let pick = if emoji { entry.emoji } else { entry.icon };
    glyphs.table(emoji).get(&pick.key(time))
}

/// Parses a raw `weatherCode` field before looking it up.
pub fn weather_icon_for<'g>(
    glyphs: &'g Glyphs,
    code: &str,
    time: TimeOfDay,
    emoji: bool,
) -> Result<&'g str> {
    let parsed = code
        .trim()
        .parse::<u16>()
        .map_err(|_| WttrError::InvalidInput(format!("Invalid weather code ({code}) was passed.")))?;

    weather_icon(glyphs, parsed, time, emoji)
}

pub fn moon_phase_icon<'g>(glyphs: &'g Glyphs, phase: &str, emoji: bool) -> Result<&'g str> {
    let (_, key) = MOON_PHASES.iter().find(|(name, _)| *name == phase).ok_or_else(|| {
        WttrError::InvalidInput(format!("Invalid moon phase ({phase}) was passed."))
    })?;

    glyphs.table(emoji).get(&format!("moon.{key}"))
}

// https://en.wikipedia.org/wiki/Ultraviolet_index
pub fn uv_index_level(uv_index: i32) -> &'static str {
    match uv_index {
        i32::MIN..=2 => "low",
        3..=5 => "moderate",
        6..=7 => "high",
        8..=10 => "very high",
        _ => "extreme",
    }
}

/// What `is_daytime` is asked about.
#[derive(Debug, Clone, Copy)]
pub enum Daylight<'a> {
    /// Today's sunrise/sunset, compared against the current time.
    Astronomy(&'a Astronomy),
    /// An hourly time code; daytime is 06:00 up to but excluding 18:00.
    Hour(&'a str),
}

pub fn parse_clock_time(time: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%I:%M %p")
        .map_err(|_| WttrError::InvalidInput(format!("Invalid time ({time}) was passed.")))
}

pub fn is_daytime(probe: Daylight<'_>, now: NaiveTime) -> Result<bool> {
    match probe {
        Daylight::Astronomy(astronomy) => {
            let sunrise = parse_clock_time(&astronomy.sunrise)?;
            let sunset = parse_clock_time(&astronomy.sunset)?;
            Ok(now >= sunrise && now <= sunset)
        }
        Daylight::Hour(hour) => {
            let code = parse_hour_code(hour)?;
            Ok((600..1800).contains(&code))
        }
    }
}

/// Day/night variant for a fragment, or neutral when day/night icons are off.
pub fn time_of_day(neutral: bool, probe: Daylight<'_>, now: NaiveTime) -> Result<TimeOfDay> {
    if neutral {
        return Ok(TimeOfDay::Neutral);
    }

    Ok(if is_daytime(probe, now)? { TimeOfDay::Day } else { TimeOfDay::Night })
}
