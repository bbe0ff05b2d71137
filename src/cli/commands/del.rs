use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_store;
use crate::core::roster::RosterLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { position, yes } = cmd {
        let mut store = open_store(cfg)?;

        let target = position
            .checked_sub(1)
            .and_then(|idx| store.get(idx))
            .ok_or(AppError::InvalidIndex(*position))?;

        let prompt = format!(
            "Delete attendee #{} ({}, ID {})? This action is irreversible.",
            position, target.name, target.id
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = RosterLogic::delete(&mut store, *position)?;

        ttlog_quiet(
            store.storage().conn(),
            "del",
            &removed.name,
            &format!("Deleted attendee #{} (ID {})", position, removed.id),
        );

        success(format!("Attendee {} (ID {}) has been deleted.", removed.name, removed.id));
    }

    Ok(())
}
