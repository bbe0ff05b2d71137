//! Non-authoritative context attached to a view (weather, map).
//! Nothing here gates capture.

pub mod map;
pub mod weather;

pub use map::{MapTarget, map_embed_url, mappable};
pub use weather::{
    EnrichmentState, Weather, WeatherProvider, decode_open_meteo, describe_weather_code,
    open_meteo_url,
};
