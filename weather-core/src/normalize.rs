//! Mapping from the provider document to the service's own schema.

use crate::{
    document::{ForecastDocument, WaForecastDay},
    model::{DayForecast, NormalizedWeather},
};

/// Stand-in for an absent floating point reading.
pub const MISSING_NUMBER: f64 = f64::NAN;
/// Stand-in for an absent integer reading.
pub const MISSING_INTEGER: i64 = -1;

impl From<ForecastDocument> for NormalizedWeather {
    fn from(doc: ForecastDocument) -> Self {
        let ForecastDocument { location, current, forecast } = doc;

        Self {
            city: location.name.unwrap_or_default(),
            region: location.region.unwrap_or_default(),
            country: location.country.unwrap_or_default(),
            temp_c: current.temp_c.unwrap_or(MISSING_NUMBER),
            feelslike_c: current.feelslike_c.unwrap_or(MISSING_NUMBER),
            humidity: current.humidity.unwrap_or(MISSING_INTEGER),
            pressure_mb: current.pressure_mb.unwrap_or(MISSING_INTEGER),
            wind_kph: current.wind_kph.unwrap_or(MISSING_NUMBER),
            wind_dir: current.wind_dir.unwrap_or_default(),
            vis_km: current.vis_km.unwrap_or(MISSING_NUMBER),
            uv: current.uv.unwrap_or(MISSING_NUMBER),
            condition: current.condition.text.unwrap_or_default(),
            icon: secure_icon(current.condition.icon.unwrap_or_default()),
            forecast: forecast.forecastday.into_iter().map(DayForecast::from).collect(),
        }
    }
}

impl From<WaForecastDay> for DayForecast {
    fn from(entry: WaForecastDay) -> Self {
        let WaForecastDay { date, day } = entry;

        Self {
            date: date.unwrap_or_default(),
            avg_temp_c: day.avgtemp_c.unwrap_or(MISSING_NUMBER),
            max_temp_c: day.maxtemp_c.unwrap_or(MISSING_NUMBER),
            min_temp_c: day.mintemp_c.unwrap_or(MISSING_NUMBER),
            condition: day.condition.text.unwrap_or_default(),
            icon: secure_icon(day.condition.icon.unwrap_or_default()),
        }
    }
}

/// WeatherAPI.com serves icons as protocol-relative URLs (`//cdn...`); pin them to https.
pub fn secure_icon(icon: String) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon }
}
