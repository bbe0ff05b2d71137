pub mod export;
pub mod log;
pub mod roster;
pub mod scan;

use crate::config::Config;
use crate::db::kv::SqliteStorage;
use crate::errors::AppResult;
use crate::store::AttendeeStore;

/// Open the configured database and load the roster from it.
pub fn open_store(cfg: &Config) -> AppResult<AttendeeStore<SqliteStorage>> {
    let storage = SqliteStorage::open(&cfg.database)?;
    Ok(AttendeeStore::open(storage))
}
