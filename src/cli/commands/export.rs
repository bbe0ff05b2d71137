use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::open_store;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::DirectorySink;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { format, dir } = cmd {
        let store = open_store(cfg)?;
        let dir = dir.clone().unwrap_or_else(|| cfg.export_dir.clone());
        let mut sink = DirectorySink::new(&dir);

        if let Some(path) = ExportLogic::export(store.records(), *format, &cfg.pdf_title, &mut sink)? {
            ttlog_quiet(
                store.storage().conn(),
                "export",
                format.as_str(),
                &format!("{} attendee(s) exported to {}", store.len(), path.display()),
            );
        }
    }

    Ok(())
}
