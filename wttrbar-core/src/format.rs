//! Turns a [`WeatherDocument`](crate::model::WeatherDocument) into the
//! status-bar text and the tooltip.
//!
//! All formatting goes through [`Formatter`], which pairs the run's
//! [`Config`] and [`Glyphs`] with a fixed "now" so that day/night and
//! current-hour decisions are made against a single instant.

use chrono::{
    Local, NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};

use crate::{
    config::{Config, Unit},
    error::{Result, WttrError},
    glyphs::Glyphs,
    lookup,
};

mod forecast;
mod text;
mod tooltip;

pub use forecast::format_chances;

#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    config: &'a Config,
    glyphs: &'a Glyphs,
    now: NaiveDateTime,
}

impl<'a> Formatter<'a> {
    pub fn new(config: &'a Config, glyphs: &'a Glyphs) -> Self {
        Self::at(config, glyphs, Local::now().naive_local())
    }

    /// Formatter pinned to a given local time.
    pub fn at(config: &'a Config, glyphs: &'a Glyphs, now: NaiveDateTime) -> Self {
        Self { config, glyphs, now }
    }

    fn temperature(&self, raw: &str) -> Result<String> {
        format_temperature(self.glyphs, raw, self.config.unit, self.config.show_temp_unit)
    }

    /// Wraps `txt` in Pango bold tags unless plain text was requested.
    fn bold(&self, txt: &str) -> String {
        if self.config.plain_text { txt.to_string() } else { format!("<b>{txt}</b>") }
    }
}

/// `"20°"`, or `"20°C"` / `"68°F"` when the unit is shown.
pub fn format_temperature(glyphs: &Glyphs, raw: &str, unit: Unit, show_unit: bool) -> Result<String> {
    let mut txt = format!("{raw}{}", glyphs.degree()?);

    if show_unit {
        txt.push_str(match unit {
            Unit::Uscs => "F",
            Unit::Si => "C",
        });
    }

    Ok(txt)
}

/// Astronomy times arrive as "06:42 AM"; 24-hour output re-renders them.
pub fn format_time(time: &str, ampm: bool) -> Result<String> {
    let parsed = lookup::parse_clock_time(time)?;
    Ok(if ampm { time.to_string() } else { parsed.format("%H:%M").to_string() })
}

/// Renders a `YYYY-MM-DD` date with a strftime pattern. An empty pattern
/// keeps the date as delivered.
pub fn format_date(date: &str, pattern: &str) -> Result<String> {
    if pattern.is_empty() {
        return Ok(date.to_string());
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| WttrError::InvalidInput(format!("Invalid date ({date}) was passed.")))?;

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(WttrError::InvalidInput(format!("Invalid date format ({pattern}) was passed.")));
    }

    Ok(parsed.format_with_items(items.into_iter()).to_string())
}
