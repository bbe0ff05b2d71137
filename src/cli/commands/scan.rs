use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_store;
use crate::core::scan::ScanLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::session::ScanSession;
use crate::session::countdown::format_remaining;
use crate::session::stdin::StdinDevice;
use crate::ui::messages::{header, info};
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// Handle the `scan` command: one scan window fed from standard input.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { duration } = cmd {
        let mut store = open_store(cfg)?;
        let duration = duration.unwrap_or(cfg.scan_duration_secs);

        let mut session = ScanSession::new(StdinDevice::stdin(), duration, cfg.capture_config())
            .with_parser(cfg.record_parser());

        header(format!("📷 Scan window: {}", format_remaining(duration)));

        let summary = ScanLogic::run(&mut session, &mut store, TICK)?;

        let conn = store.storage().conn();
        for r in &summary.captured {
            ttlog_quiet(conn, "capture", &r.name, &format!("ID {}", r.id));
        }

        let outcome = if summary.expired {
            "expired".to_string()
        } else {
            format!("stopped with {} left", format_remaining(summary.remaining))
        };
        ttlog_quiet(
            conn,
            "session",
            session.state().as_str(),
            &format!(
                "{} captured, {} failed scans, {}",
                summary.captured.len(),
                summary.decode_failures,
                outcome
            ),
        );

        info(format!(
            "{} attendee(s) captured, {} in roster.",
            summary.captured.len(),
            store.len()
        ));
    }

    Ok(())
}
