use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LookupError;

/// Location requested by a caller: a place name, a coordinate pair, or both.
///
/// Deserializes straight from the `?city=&lat=&lon=` query string. A
/// coordinate that is empty or not a number is treated as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub lon: Option<f64>,
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self { city: Some(name.into()), ..Self::default() }
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self { city: None, lat: Some(lat), lon: Some(lon) }
    }

    /// Resolve the query into the term sent upstream.
    ///
    /// A non-blank city wins over coordinates; otherwise both coordinates
    /// must be present and finite.
    pub fn subject(&self) -> Result<Subject, LookupError> {
        if let Some(city) = self.city.as_deref().filter(|c| !c.trim().is_empty()) {
            return Ok(Subject::Place(city.to_owned()));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Ok(Subject::Coordinates { lat, lon })
            }
            _ => Err(LookupError::MissingParameters),
        }
    }
}

fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

/// Missing readings go out as the string `"NaN"`; JSON has no literal for it.
fn reading<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() { serializer.serialize_f64(*value) } else { serializer.serialize_str("NaN") }
}

/// The validated location term, rendered as the provider's `q` parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Place(String),
    Coordinates { lat: f64, lon: f64 },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Place(name) => f.write_str(name),
            Subject::Coordinates { lat, lon } => write!(f, "{lat:.6},{lon:.6}"),
        }
    }
}

/// Frontend-facing weather summary.
///
/// Every key is always serialized. Numeric fields the provider left out hold
/// `NaN` (written as the string `"NaN"`) or `-1` for the integer fields.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedWeather {
    pub city: String,
    pub region: String,
    pub country: String,
    #[serde(serialize_with = "reading")]
    pub temp_c: f64,
    #[serde(serialize_with = "reading")]
    pub feelslike_c: f64,
    pub humidity: i64,
    pub pressure_mb: i64,
    #[serde(serialize_with = "reading")]
    pub wind_kph: f64,
    pub wind_dir: String,
    #[serde(serialize_with = "reading")]
    pub vis_km: f64,
    #[serde(serialize_with = "reading")]
    pub uv: f64,
    pub condition: String,
    pub icon: String,
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayForecast {
    pub date: String,
    #[serde(serialize_with = "reading")]
    pub avg_temp_c: f64,
    #[serde(serialize_with = "reading")]
    pub max_temp_c: f64,
    #[serde(serialize_with = "reading")]
    pub min_temp_c: f64,
    pub condition: String,
    pub icon: String,
}
