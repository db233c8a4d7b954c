use chrono::Timelike;

use super::{Formatter, format_date, format_time};
use crate::{
    config::FormatType,
    error::Result,
    lookup::{self, Daylight},
    model::{Day, Fragment, WeatherDocument},
    report::BriefReport,
};

/// Hourly chance fields and the label each one is shown with.
const CHANCES: &[(&str, &str)] = &[
    ("chanceoffog", "Fog"),
    ("chanceoffrost", "Frost"),
    ("chanceofovercast", "Overcast"),
    ("chanceofrain", "Rain"),
    ("chanceofsnow", "Snow"),
    ("chanceofsunshine", "Sunshine"),
    ("chanceofthunder", "Thunder"),
    ("chanceofwindy", "Wind"),
];

fn day_label(index: usize) -> &'static str {
    match index {
        0 => "Today, ",
        1 => "Tomorrow, ",
        2 => "Day after tomorrow, ",
        _ => "",
    }
}

/// "12AM", "3AM", "12PM", "9PM".
fn twelve_hour(hour: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let shown = match hour {
        0 => 12,
        13.. => hour % 12,
        _ => hour,
    };
    format!("{shown}{suffix}")
}

/// Non-zero chances, highest first, at most `max` of them (0 = all).
pub fn format_chances(hour: &Fragment, max: usize) -> Result<String> {
    let mut found = Vec::new();
    for (key, label) in CHANCES {
        let pct = hour.percent(key)?;
        if pct > 0 {
            found.push((*label, pct));
        }
    }

    // stable: equal chances keep their field order
    found.sort_by(|a, b| b.1.cmp(&a.1));
    let limit = if max == 0 { found.len() } else { max };

    Ok(found
        .iter()
        .take(limit)
        .map(|(label, pct)| format!("{label} {pct}%"))
        .collect::<Vec<_>>()
        .join(", "))
}

impl Formatter<'_> {
    /// One block per forecast day, each followed by a blank line.
    pub(super) fn forecast(&self, doc: &WeatherDocument) -> Result<String> {
        let mut txt = String::new();
        let current_hour = self.now.hour();

        for (index, day) in doc.weather.iter().enumerate() {
            let heading = format!("{}{}", day_label(index), format_date(&day.date, &self.config.date_format)?);
            txt.push_str(&self.bold(&heading));
            txt.push('\n');
            txt.push_str(&self.summary(day)?);

            for hour in &day.hourly {
                let time = hour.require("time")?;
                if index == 0 && lookup::parse_hour_code(&time)? / 100 < current_hour {
                    continue;
                }
                txt.push_str(&self.hour_line(hour, &time)?);
            }

            txt.push('\n');
        }

        Ok(txt)
    }

    /// Max/min temperature and sunrise/sunset for one day.
    fn summary(&self, day: &Day) -> Result<String> {
        let unit = self.config.unit;
        let astronomy = day.astronomy()?;
        let max = self.temperature(day.max_temp(unit))?;
        let min = self.temperature(day.min_temp(unit))?;
        let sunrise = format_time(&astronomy.sunrise, self.config.ampm)?;
        let sunset = format_time(&astronomy.sunset, self.config.ampm)?;

        if self.config.format_type == FormatType::Text {
            return Ok(format!("max: {max} min: {min} sunrise: {sunrise} sunset: {sunset}\n"));
        }

        let table = self.glyphs.table(self.config.emoji);
        let (up, down) = (table.get("arrow.up")?, table.get("arrow.down")?);
        let (rise, set) = (table.get("sunrise")?, table.get("sunset")?);

        Ok(match self.config.format_type {
            FormatType::TextIcon => format!(
                "{up} max: {max} {down} min: {min} {rise} sunrise: {sunrise} {set} sunset: {sunset}\n"
            ),
            _ => format!("{up} {max} {down} {min} {rise} {sunrise} {set} {sunset}\n"),
        })
    }

    fn hour_text(&self, time: &str) -> Result<String> {
        let hour = lookup::parse_hour_code(time)? / 100;
        let digits = if self.config.ampm { twelve_hour(hour) } else { format!("{hour:02}") };

        if self.config.format_type == FormatType::Text || self.config.hour_text_only {
            return Ok(digits);
        }

        let clock = lookup::clock_icon(self.glyphs, time, self.config.emoji)?;
        Ok(match self.config.format_type {
            FormatType::TextIcon => format!("{clock} {digits}"),
            _ => clock.to_string(),
        })
    }

    fn hour_line(&self, hour: &Fragment, time: &str) -> Result<String> {
        let label = self.hour_text(time)?;
        let report =
            BriefReport::new(hour, self.config, self.glyphs, Daylight::Hour(time), self.now.time())?;
        let temp = self.temperature(&report.temp)?;
        let desc = &report.description;

        let mut line = match self.config.format_type {
            FormatType::Text => format!("{label} {temp} {desc}"),
            _ if self.config.emoji => format!("{label}  {}  {temp} {desc}", report.icon),
            _ => format!("{label} {}  {temp} {desc}", report.icon),
        };

        if !self.config.hide_conditions {
            let chances = format_chances(hour, self.config.max_conditions)?;
            if !chances.is_empty() {
                line.push_str(", ");
                line.push_str(&chances);
            }
        }

        line.push('\n');
        Ok(line)
    }
}
