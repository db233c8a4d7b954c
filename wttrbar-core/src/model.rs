use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    config::Unit,
    error::{Result, WttrError},
};

/// The `format=j1` document returned by wttr.in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherDocument {
    #[serde(default)]
    pub nearest_area: Vec<Area>,
    #[serde(default)]
    pub current_condition: Vec<Fragment>,
    #[serde(default)]
    pub weather: Vec<Day>,
}

impl WeatherDocument {
    pub fn current(&self) -> Result<&Fragment> {
        self.current_condition
            .first()
            .ok_or_else(|| WttrError::MissingField("current_condition".into()))
    }

    pub fn today(&self) -> Result<&Day> {
        self.weather.first().ok_or_else(|| WttrError::MissingField("weather".into()))
    }

    pub fn area(&self) -> Option<&Area> {
        self.nearest_area.first()
    }
}

/// A localized label, always delivered as `[{"value": "..."}]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub value: String,
}

fn first_label(labels: &[Label]) -> &str {
    labels.first().map(|l| l.value.as_str()).unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    #[serde(rename = "areaName", default)]
    pub area_name: Vec<Label>,
    #[serde(default)]
    pub region: Vec<Label>,
    #[serde(default)]
    pub country: Vec<Label>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Area {
    pub fn name(&self) -> &str {
        first_label(&self.area_name)
    }

    pub fn region(&self) -> &str {
        first_label(&self.region)
    }

    pub fn country(&self) -> &str {
        first_label(&self.country)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub date: String,
    #[serde(rename = "maxtempC")]
    pub max_temp_c: String,
    #[serde(rename = "maxtempF")]
    pub max_temp_f: String,
    #[serde(rename = "mintempC")]
    pub min_temp_c: String,
    #[serde(rename = "mintempF")]
    pub min_temp_f: String,
    #[serde(default)]
    pub astronomy: Vec<Astronomy>,
    #[serde(default)]
    pub hourly: Vec<Fragment>,
}

impl Day {
    pub fn astronomy(&self) -> Result<&Astronomy> {
        self.astronomy
            .first()
            .ok_or_else(|| WttrError::MissingField(format!("astronomy for {}", self.date)))
    }

    pub fn max_temp(&self, unit: Unit) -> &str {
        match unit {
            Unit::Uscs => &self.max_temp_f,
            Unit::Si => &self.max_temp_c,
        }
    }

    pub fn min_temp(&self, unit: Unit) -> &str {
        match unit {
            Unit::Uscs => &self.min_temp_f,
            Unit::Si => &self.min_temp_c,
        }
    }
}

/// Sun and moon data for one day. Times are 12-hour clock strings ("06:42 AM").
#[derive(Debug, Clone, Deserialize)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
    pub moon_phase: String,
}

/// One block of conditions: either `current_condition[0]` or an hourly entry.
///
/// Kept as a raw map because the main indicator and custom templates may
/// reference any field wttr.in returns, and the two fragment kinds spell
/// some fields differently (`temp_C` vs `tempC`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Fragment(Map<String, Value>);

impl Fragment {
    /// Text value of a field. Label lists resolve to their first label.
    pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0.get(key).and_then(value_text)
    }

    pub fn require(&self, key: &str) -> Result<Cow<'_, str>> {
        self.get(key).ok_or_else(|| WttrError::MissingField(key.to_string()))
    }

    /// First present field among `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<Cow<'_, str>> {
        keys.iter().find_map(|k| self.get(k))
    }

    pub fn description(&self) -> Result<Cow<'_, str>> {
        self.require("weatherDesc")
    }

    /// Integer percentage field such as `chanceofrain`.
    pub fn percent(&self, key: &str) -> Result<u32> {
        let raw = self.require(key)?;
        raw.trim()
            .parse()
            .map_err(|_| WttrError::InvalidInput(format!("{key} is not a percentage ({raw})")))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.0.iter().filter_map(|(k, v)| value_text(v).map(|t| (k.as_str(), t)))
    }
}

fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Array(items) => match items.first() {
            Some(Value::Object(obj)) if obj.contains_key("value") => {
                obj.get("value").and_then(value_text)
            }
            _ => Some(Cow::Owned(value.to_string())),
        },
        Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: Value) -> Fragment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn label_lists_resolve_to_first_value() {
        let f = fragment(json!({ "weatherDesc": [{ "value": "Partly cloudy" }] }));
        assert_eq!(f.description().unwrap(), "Partly cloudy");
    }

    #[test]
    fn numbers_read_as_text() {
        let f = fragment(json!({ "humidity": 71 }));
        assert_eq!(f.get("humidity").unwrap(), "71");
    }

    #[test]
    fn first_of_prefers_earlier_spelling() {
        let f = fragment(json!({ "temp_C": "20", "tempC": "21" }));
        assert_eq!(f.first_of(&["tempC", "temp_C"]).unwrap(), "21");
        assert_eq!(f.first_of(&["tempX", "temp_C"]).unwrap(), "20");
        assert!(f.first_of(&["tempX"]).is_none());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let f = fragment(json!({}));
        let err = f.require("weatherCode").unwrap_err();
        assert!(matches!(err, WttrError::MissingField(ref k) if k == "weatherCode"));
    }

    #[test]
    fn percent_rejects_non_numbers() {
        let f = fragment(json!({ "chanceofrain": "80", "chanceofsnow": "lots" }));
        assert_eq!(f.percent("chanceofrain").unwrap(), 80);
        assert!(matches!(f.percent("chanceofsnow"), Err(WttrError::InvalidInput(_))));
    }

    #[test]
    fn empty_document_has_no_area_or_today() {
        let doc: WeatherDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.area().is_none());
        assert!(doc.today().is_err());
        assert!(doc.current().is_err());
    }

    #[test]
    fn day_selects_temperatures_by_unit() {
        let day: Day = serde_json::from_value(json!({
            "date": "2024-05-01",
            "maxtempC": "21", "maxtempF": "70",
            "mintempC": "9", "mintempF": "48",
        }))
        .unwrap();

        assert_eq!(day.max_temp(Unit::Si), "21");
        assert_eq!(day.min_temp(Unit::Uscs), "48");
        assert!(day.astronomy().is_err());
    }
}
