use super::Formatter;
use crate::{
    config::{FormatType, Unit},
    error::{Result, WttrError},
    lookup::{self, Daylight},
    model::{Fragment, WeatherDocument},
    report::BriefReport,
};

const LOCATION_NOT_AVAILABLE: &str = "Location: N/A";
const NOT_AVAILABLE: &str = "N/A";

impl Formatter<'_> {
    /// Multi-line details: current conditions, location and the forecast.
    pub fn tooltip(&self, doc: &WeatherDocument) -> Result<String> {
        let current = doc.current()?;
        let astronomy = doc.today()?.astronomy()?;
        let now = self.now.time();
        let report =
            BriefReport::new(current, self.config, self.glyphs, Daylight::Astronomy(astronomy), now)?;

        let mut txt = if self.config.plain_text {
            format!("{}, ", report.description)
        } else {
            format!("<b>{}</b> ", report.description)
        };

        txt.push_str(&format!("{}\n", self.temperature(&report.temp)?));
        txt.push_str(&format!("Feels Like: {}\n", self.temperature(&report.feels_like)?));
        txt.push_str(&format!("Humidity: {}%\n", current.require("humidity")?));
        txt.push_str(&format!("Wind: {}\n", self.wind(current)?));

        if !lookup::is_daytime(Daylight::Astronomy(astronomy), now)? {
            let icon =
                lookup::moon_phase_icon(self.glyphs, &astronomy.moon_phase, self.config.emoji)?;
            txt.push_str(&format!("Moon Phase: {icon} ({})\n", astronomy.moon_phase));
        }

        let uv = current.require("uvIndex")?;
        let uv_level = uv
            .trim()
            .parse::<i32>()
            .map(lookup::uv_index_level)
            .map_err(|_| WttrError::InvalidInput(format!("Invalid UV index ({uv}) was passed.")))?;
        txt.push_str(&format!("UV Index: {uv} ({uv_level}) \n"));

        txt.push_str(&self.location(doc)?);
        txt.push_str("\n\n");
        txt.push_str(&self.forecast(doc)?);

        Ok(txt.trim_end().to_string())
    }

    /// Speed, direction glyph and compass details.
    ///
    /// Imperial reads `windspeedKmph` and metric reads `windspeedMiles`,
    /// each labelled with the unit of the field actually read. This matches
    /// what wttrbar has always printed for both unit systems.
    fn wind(&self, data: &Fragment) -> Result<String> {
        let (key, suffix) = match self.config.unit {
            Unit::Uscs => ("windspeedKmph", " km/h"),
            Unit::Si => ("windspeedMiles", " mph"),
        };

        let mut txt = format!("{}{suffix}", data.require(key)?);
        let degrees = data.require("winddirDegree")?;

        if self.config.format_type != FormatType::Text {
            let parsed = degrees.trim().parse::<i32>().map_err(|_| {
                WttrError::InvalidInput(format!("Invalid wind direction degree ({degrees}) was passed."))
            })?;
            txt.push(' ');
            txt.push_str(lookup::wind_icon(self.glyphs, parsed, self.config.emoji)?);
        }

        if !self.config.hide_wind_details {
            txt.push_str(&format!(
                " ({degrees}{} {})",
                self.glyphs.degree()?,
                data.require("winddir16Point")?
            ));
        }

        Ok(txt)
    }

    fn location(&self, doc: &WeatherDocument) -> Result<String> {
        let Some(area) = doc.area() else {
            return Ok(LOCATION_NOT_AVAILABLE.to_string());
        };

        let emoji = self.config.emoji;
        let degree = self.glyphs.degree()?;
        let icons = self.glyphs.icons();
        let lat = format!("{}{degree}", area.latitude.as_deref().unwrap_or(NOT_AVAILABLE));
        let lon = format!("{}{degree}", area.longitude.as_deref().unwrap_or(NOT_AVAILABLE));

        let mut place = String::new();
        for part in [area.name(), area.region()] {
            if !part.is_empty() {
                place.push_str(part);
                place.push_str(", ");
            }
        }
        place.push_str(area.country());

        let marker =
            if emoji { self.glyphs.emojis().get("flag-in-hole")? } else { icons.get("location")? };

        let txt = match self.config.format_type {
            FormatType::Text => format!("Location: {place} (lat: {lat} lon: {lon})"),
            FormatType::Icon if emoji => format!("{} {place} ({lat} {lon})", marker),
            FormatType::Icon => format!(
                "{} {place} ({} {lat} {} {lon})",
                marker,
                icons.get("latitude")?,
                icons.get("longitude")?
            ),
            FormatType::TextIcon if emoji => {
                format!("{} Location: {place} (lat: {lat} lon: {lon})", marker)
            }
            FormatType::TextIcon => format!(
                "{} Location: {place} ({} lat: {lat} {} lon: {lon})",
                marker,
                icons.get("latitude")?,
                icons.get("longitude")?
            ),
        };

        Ok(txt)
    }
}
