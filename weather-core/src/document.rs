//! Partial mirror of the WeatherAPI.com `forecast.json` document.
//!
//! Only the fields the service reads are modelled. Every field is optional
//! and decoded leniently: a value of the wrong type at any depth is treated
//! as absent instead of failing the whole document. The only hard failure is
//! a body that is not JSON at all.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastDocument {
    #[serde(deserialize_with = "lenient::object")]
    pub location: WaLocation,
    #[serde(deserialize_with = "lenient::object")]
    pub current: WaCurrent,
    #[serde(deserialize_with = "lenient::object")]
    pub forecast: WaForecast,
}

impl ForecastDocument {
    /// Decode a response body. Any valid JSON yields a document; a top-level
    /// value that is not an object yields an empty one.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(lenient::from_object(value))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaLocation {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaCondition {
    #[serde(deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaCurrent {
    #[serde(deserialize_with = "lenient::number")]
    pub temp_c: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub feelslike_c: Option<f64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub humidity: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub pressure_mb: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_kph: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub wind_dir: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub vis_km: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub uv: Option<f64>,
    #[serde(deserialize_with = "lenient::object")]
    pub condition: WaCondition,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaForecast {
    #[serde(deserialize_with = "lenient::sequence")]
    pub forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaForecastDay {
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::object")]
    pub day: WaDay,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaDay {
    #[serde(deserialize_with = "lenient::number")]
    pub avgtemp_c: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub maxtemp_c: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub mintemp_c: Option<f64>,
    #[serde(deserialize_with = "lenient::object")]
    pub condition: WaCondition,
}

/// Field decoders that never fail on a well-formed JSON value.
mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;

    pub fn from_object<T>(value: Value) -> T
    where
        T: DeserializeOwned + Default,
    {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        }
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(from_object(Value::deserialize(deserializer)?))
    }

    pub fn sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().map(from_object).collect(),
            _ => Vec::new(),
        })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
            Value::String(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| s.parse().ok().and_then(truncate))
            }
            _ => None,
        })
    }
}
