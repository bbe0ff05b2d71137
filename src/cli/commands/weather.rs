use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_store;
use crate::core::roster::RosterLogic;
use crate::enrich::{EnrichmentState, Weather, WeatherProvider, decode_open_meteo, open_meteo_url};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, warning};
use std::fs;
use std::path::PathBuf;

/// A response body saved to disk, decoded on demand.
struct SavedResponse {
    path: PathBuf,
}

impl WeatherProvider for SavedResponse {
    fn current(&self, _lat: f64, _lng: f64) -> AppResult<Weather> {
        let body = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Enrichment(format!("cannot read {}: {e}", self.path.display()))
        })?;
        decode_open_meteo(&body)
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Weather { position, response } = cmd {
        let store = open_store(cfg)?;
        let target = RosterLogic::map_target(&store, *position)?;

        header(format!("🌤️  {}", target.title()));

        if target.embed_url().is_none() {
            warning(format!("{} has no recorded location.", target.name));
            return Ok(());
        }

        match response {
            Some(path) => {
                println!("{}", EnrichmentState::Loading.label());
                let provider = SavedResponse {
                    path: PathBuf::from(path),
                };
                let state = EnrichmentState::resolve(&provider, target.lat, target.lng);
                println!("{}", state.label());
            }
            None => println!("{}", open_meteo_url(target.lat, target.lng)),
        }
    }

    Ok(())
}
