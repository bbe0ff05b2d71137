use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_store;
use crate::core::roster::RosterLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        let mut store = open_store(cfg)?;

        if store.is_empty() {
            info("No attendees recorded yet.");
            return Ok(());
        }

        let prompt = format!(
            "Delete ALL {} attendee records? This action is irreversible.",
            store.len()
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let count = RosterLogic::clear(&mut store)?;

        ttlog_quiet(
            store.storage().conn(),
            "clear",
            "",
            &format!("{count} attendee(s) removed"),
        );

        success(format!("{count} attendee record(s) cleared."));
    }

    Ok(())
}
