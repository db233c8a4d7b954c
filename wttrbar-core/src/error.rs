use thiserror::Error;

/// Every failure the formatting engine can report.
///
/// Only [`WttrError::FetchFailure`] is recoverable: it is turned into the
/// degraded status-bar envelope instead of aborting the run.
#[derive(Debug, Error)]
pub enum WttrError {
    /// A lookup helper was given a code, degree or name outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid unit ({0}) was passed. Supported units: SI, USCS.")]
    InvalidUnit(String),

    /// The main indicator names a field the current conditions do not carry.
    #[error("Key not found in current conditions: {0}")]
    KeyNotFound(String),

    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),

    /// A field the formatter depends on is absent from the weather document.
    #[error("Missing field in weather data: {0}")]
    MissingField(String),

    #[error("{0}")]
    FetchFailure(String),

    /// Icon or emoji table could not be loaded or is incomplete.
    #[error("Failed to load glyph table: {0}")]
    Resource(String),
}

pub type Result<T> = std::result::Result<T, WttrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_error_names_the_key() {
        let err = WttrError::InvalidPlaceholder("pressure_hPa".into());
        assert_eq!(err.to_string(), "Invalid placeholder: pressure_hPa");
    }

    #[test]
    fn fetch_failure_is_shown_verbatim() {
        let err = WttrError::FetchFailure("HTTP status 503".into());
        assert_eq!(err.to_string(), "HTTP status 503");
    }
}
