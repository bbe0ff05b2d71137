use crate::config::Config;
use crate::core::open_store;
use crate::core::roster::RosterLogic;
use crate::enrich::mappable;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;

    if store.is_empty() {
        println!("No attendees recorded yet.");
        return Ok(());
    }

    header(format!("👥 Attendee Records ({})", store.len()));
    print!("{}", RosterLogic::render_table(store.records()));

    let located = mappable(store.records()).count();
    if located > 0 {
        println!();
        info(format!("{located} attendee(s) with a recorded location (see `map <POS>`)."));
    }
    Ok(())
}
