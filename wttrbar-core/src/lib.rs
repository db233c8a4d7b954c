//! Core library for the `wttrbar` status-bar module.
//!
//! This crate defines:
//! - The wttr.in `format=j1` document model
//! - Icon/emoji tables and the lookups into them
//! - Text and tooltip formatting under a [`Config`]
//! - The weather provider abstraction and the JSON output envelope
//!
//! It is used by the `wttrbar` binary, but the formatters are plain
//! functions of a document, a config and a point in time, so they can be
//! driven from anywhere.

pub mod config;
pub mod error;
pub mod format;
pub mod glyphs;
pub mod lookup;
pub mod model;
pub mod output;
pub mod provider;
pub mod report;

pub use config::{Config, FormatType, Settings, Unit};
pub use error::{Result, WttrError};
pub use format::Formatter;
pub use glyphs::Glyphs;
pub use model::WeatherDocument;
pub use output::{Output, render, render_document};
pub use provider::{Endpoint, WeatherProvider, WttrProvider};
pub use report::BriefReport;
