use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, model::WeatherDocument};

pub mod wttr;

pub use wttr::WttrProvider;

/// Where the `format=j1` document is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The public wttr.in service.
    Wttr,
    /// A local file server, so that debugging does not hit wttr.in.
    Local,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Wttr => "wttr.in",
            Endpoint::Local => "local",
        }
    }

    pub fn from_debug_flag(debug: bool) -> Self {
        if debug { Endpoint::Local } else { Endpoint::Wttr }
    }

    /// Request URL for a location; an empty location lets wttr.in geolocate.
    pub fn url(&self, location: &str) -> String {
        match self {
            Endpoint::Wttr => format!("https://wttr.in/{location}?format=j1"),
            Endpoint::Local => format!("http://0.0.0.0:8000/{location}.json?format=j1"),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the weather document. Every failure is a
    /// [`WttrError::FetchFailure`](crate::WttrError::FetchFailure).
    async fn fetch(&self, location: &str) -> Result<WeatherDocument>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wttr_url_requests_j1_format() {
        assert_eq!(Endpoint::Wttr.url("Paris"), "https://wttr.in/Paris?format=j1");
        assert_eq!(Endpoint::Wttr.url(""), "https://wttr.in/?format=j1");
    }

    #[test]
    fn debug_flag_selects_local_endpoint() {
        let endpoint = Endpoint::from_debug_flag(true);
        assert_eq!(endpoint, Endpoint::Local);
        assert_eq!(endpoint.url("Paris"), "http://0.0.0.0:8000/Paris.json?format=j1");
        assert_eq!(Endpoint::from_debug_flag(false), Endpoint::Wttr);
    }
}
