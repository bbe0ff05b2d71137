use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_store;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Map { position } = cmd {
        let store = open_store(cfg)?;
        let target = RosterLogic::map_target(&store, *position)?;

        header(format!("📍 {}", target.title()));

        match target.embed_url() {
            Some(url) => println!("{url}"),
            None => warning(format!("{} has no recorded location.", target.name)),
        }
    }

    Ok(())
}
