//! Roster store: newest-first list of attendees persisted as one JSON slot.
//!
//! Every mutation rewrites the whole slot before returning, so the storage
//! always reflects the latest completed operation. Rosters are expected to
//! stay small (a single event), which keeps whole-collection writes cheap.

use crate::db::kv::KeyValueStorage;
use crate::errors::AppResult;
use crate::models::AttendeeRecord;
use crate::ui::messages::warning;

/// Fixed storage key of the roster.
pub const ROSTER_SLOT: &str = "attendees";

pub struct AttendeeStore<S: KeyValueStorage> {
    storage: S,
    records: Vec<AttendeeRecord>,
}

impl<S: KeyValueStorage> AttendeeStore<S> {
    /// Take ownership of `storage` and load the persisted roster.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
        };
        store.records = store.load();
        store
    }

    /// Read the persisted roster.
    ///
    /// An absent slot, a storage failure or an undecodable value all yield an
    /// empty roster.
    pub fn load(&self) -> Vec<AttendeeRecord> {
        let raw = match self.storage.get(ROSTER_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warning(format!("Could not read stored attendees: {e}"));
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<AttendeeRecord>>>(&raw) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                warning(format!("Stored attendees are unreadable, starting empty: {e}"));
                Vec::new()
            }
        }
    }

    /// Write the whole in-memory roster to the slot.
    pub fn save(&mut self) -> AppResult<()> {
        let json = serde_json::to_string(&self.records)?;
        self.storage.set(ROSTER_SLOT, &json)
    }

    /// Prepend `record` and persist.
    ///
    /// On a write failure the record stays in memory and the error is returned.
    pub fn add(&mut self, record: AttendeeRecord) -> AppResult<()> {
        self.records.insert(0, record);
        self.save()
    }

    /// Remove the entry at `index` (0-based) and persist.
    /// Out-of-range indexes are ignored and nothing is written.
    pub fn remove(&mut self, index: usize) -> AppResult<Option<AttendeeRecord>> {
        if index >= self.records.len() {
            return Ok(None);
        }

        let removed = self.records.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    /// Empty the roster in memory and in storage.
    pub fn clear(&mut self) -> AppResult<()> {
        self.records.clear();
        self.storage.remove(ROSTER_SLOT)
    }

    pub fn records(&self) -> &[AttendeeRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&AttendeeRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
