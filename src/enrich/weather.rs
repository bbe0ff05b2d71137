//! Current-weather enrichment (Open-Meteo shaped).
//!
//! The HTTP transport belongs to the caller: this module builds the request
//! URL, decodes the JSON response and maps WMO weather codes.

use crate::errors::{AppError, AppResult};
use serde::Deserialize;

const OPEN_METEO_FORECAST: &str = "https://api.open-meteo.com/v1/forecast";

/// What a view shows for the current weather.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub temperature_c: i32,
    pub description: &'static str,
    pub icon: &'static str,
    pub humidity_pct: f64,
    /// m/s, one decimal.
    pub wind_speed: String,
}

/// Anything able to answer "what is the weather at (lat, lng)".
pub trait WeatherProvider {
    fn current(&self, lat: f64, lng: f64) -> AppResult<Weather>;
}

/// Display state of the weather panel.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentState {
    Loading,
    Available(Weather),
    Unavailable,
}

impl EnrichmentState {
    /// Query `provider`; any failure becomes `Unavailable`.
    pub fn resolve<P: WeatherProvider + ?Sized>(provider: &P, lat: f64, lng: f64) -> Self {
        match provider.current(lat, lng) {
            Ok(w) => EnrichmentState::Available(w),
            Err(e) => {
                crate::ui::messages::warning(format!("Failed to fetch weather: {e}"));
                EnrichmentState::Unavailable
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            EnrichmentState::Loading => "Loading...".to_string(),
            EnrichmentState::Available(w) => format!(
                "{} {}°C {} | 💧 {}% | 💨 {} m/s",
                w.icon, w.temperature_c, w.description, w.humidity_pct, w.wind_speed
            ),
            EnrichmentState::Unavailable => "Weather unavailable".to_string(),
        }
    }
}

/// Request URL for the current conditions at (lat, lng).
pub fn open_meteo_url(lat: f64, lng: f64) -> String {
    format!(
        "{OPEN_METEO_FORECAST}?latitude={lat}&longitude={lng}\
         &current=temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m&timezone=auto"
    )
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: u16,
    wind_speed_10m: f64,
}

/// Decode an Open-Meteo `forecast` response body.
pub fn decode_open_meteo(body: &str) -> AppResult<Weather> {
    let resp: ForecastResponse =
        serde_json::from_str(body).map_err(|e| AppError::Enrichment(e.to_string()))?;
    let c = resp.current;
    let (description, icon) = describe_weather_code(c.weather_code);

    Ok(Weather {
        temperature_c: c.temperature_2m.round() as i32,
        description,
        icon,
        humidity_pct: c.relative_humidity_2m,
        wind_speed: format!("{:.1}", c.wind_speed_10m),
    })
}

/// Codes with a known description, in ascending order.
pub const KNOWN_CODES: [u16; 24] = [
    0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95, 96, 99,
];

/// WMO weather code → (description, icon).
pub fn describe_weather_code(code: u16) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 | 48 => ("Foggy", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Drizzle", "🌦️"),
        55 => ("Heavy drizzle", "🌧️"),
        61 => ("Light rain", "🌧️"),
        63 => ("Rain", "🌧️"),
        65 => ("Heavy rain", "⛈️"),
        71 => ("Light snow", "🌨️"),
        73 => ("Snow", "❄️"),
        75 => ("Heavy snow", "❄️"),
        77 => ("Snow grains", "🌨️"),
        80 => ("Light showers", "🌦️"),
        81 => ("Showers", "🌧️"),
        82 => ("Heavy showers", "⛈️"),
        85 => ("Light snow showers", "🌨️"),
        86 => ("Snow showers", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 | 99 => ("Thunderstorm with hail", "⛈️"),
        _ => ("Unknown", "🌡️"),
    }
}
