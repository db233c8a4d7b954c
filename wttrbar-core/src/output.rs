use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::{
    config::Config,
    error::{Result, WttrError},
    format::Formatter,
    glyphs::Glyphs,
    model::WeatherDocument,
    provider::WeatherProvider,
};

/// Shown in the bar when the weather could not be fetched.
pub const ERROR_GLYPH: &str = "⚠️";

/// What gets printed for the status bar host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// `{"text": ..., "tooltip": ...}` as Waybar expects it.
    Bar { text: String, tooltip: String },
    /// Plain-text mode prints the tooltip on its own.
    Plain(String),
}

impl Output {
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Output::Bar { text: ERROR_GLYPH.to_string(), tooltip: message.into() }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Formats an already fetched document.
pub fn render_document(
    doc: &WeatherDocument,
    config: &Config,
    glyphs: &Glyphs,
    now: NaiveDateTime,
) -> Result<Output> {
    let formatter = Formatter::at(config, glyphs, now);
    let text = formatter.text(doc)?;
    let tooltip = formatter.tooltip(doc)?;

    Ok(if config.plain_text { Output::Plain(tooltip) } else { Output::Bar { text, tooltip } })
}

/// Fetch, then format. A failed fetch short-circuits to the error envelope
/// without touching the formatters; every other error is returned.
pub async fn render(
    provider: &dyn WeatherProvider,
    location: &str,
    config: &Config,
    glyphs: &Glyphs,
) -> Result<Output> {
    let doc = match provider.fetch(location).await {
        Ok(doc) => doc,
        Err(WttrError::FetchFailure(message)) => return Ok(Output::fetch_failure(message)),
        Err(other) => return Err(other),
    };

    render_document(&doc, config, glyphs, Local::now().naive_local())
}
