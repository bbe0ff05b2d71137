use crate::db::kv::KeyValueStorage;
use crate::enrich::MapTarget;
use crate::errors::{AppError, AppResult};
use crate::models::AttendeeRecord;
use crate::store::AttendeeStore;
use crate::utils::table::Table;

/// Roster operations behind `list`, `del`, `clear` and `map`.
///
/// Positions are 1-based, as shown by `list`.
pub struct RosterLogic;

impl RosterLogic {
    pub fn render_table(records: &[AttendeeRecord]) -> String {
        let mut table = Table::new(&["#", "Name", "ID", "Date", "Time", "Location"]);

        for (idx, r) in records.iter().enumerate() {
            let location = if r.has_location() {
                format!("{}, {}", r.lat, r.lng)
            } else {
                "-".to_string()
            };
            table.add_row(vec![
                (idx + 1).to_string(),
                r.name.clone(),
                r.id.clone(),
                r.date.clone(),
                r.time.clone(),
                location,
            ]);
        }

        table.render()
    }

    /// Remove the attendee shown at `position`.
    pub fn delete<S: KeyValueStorage>(
        store: &mut AttendeeStore<S>,
        position: usize,
    ) -> AppResult<AttendeeRecord> {
        let index = to_index(position)?;
        store
            .remove(index)?
            .ok_or(AppError::InvalidIndex(position))
    }

    pub fn clear<S: KeyValueStorage>(store: &mut AttendeeStore<S>) -> AppResult<usize> {
        let count = store.len();
        store.clear()?;
        Ok(count)
    }

    pub fn map_target<S: KeyValueStorage>(
        store: &AttendeeStore<S>,
        position: usize,
    ) -> AppResult<MapTarget> {
        let index = to_index(position)?;
        store
            .get(index)
            .map(MapTarget::from_record)
            .ok_or(AppError::InvalidIndex(position))
    }
}

fn to_index(position: usize) -> AppResult<usize> {
    position
        .checked_sub(1)
        .ok_or(AppError::InvalidIndex(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::kv::MemoryStorage;

    fn store() -> AttendeeStore<MemoryStorage> {
        let mut s = AttendeeStore::open(MemoryStorage::new());
        s.add(AttendeeRecord::new("Alice", "42", "d1", "t1")).unwrap();
        s.add(AttendeeRecord::new("Bob", "7", "d2", "t2").with_coords(14.5, 121.0))
            .unwrap();
        s
    }

    #[test]
    fn table_shows_positions_in_roster_order() {
        let s = store();
        let out = RosterLogic::render_table(s.records());
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[2].starts_with("1  Bob"));
        assert!(lines[2].ends_with("14.5, 121"));
        assert!(lines[3].starts_with("2  Alice"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn delete_by_position() {
        let mut s = store();
        assert!(matches!(
            RosterLogic::delete(&mut s, 0),
            Err(AppError::InvalidIndex(0))
        ));
        assert!(matches!(
            RosterLogic::delete(&mut s, 3),
            Err(AppError::InvalidIndex(3))
        ));
        let removed = RosterLogic::delete(&mut s, 2).unwrap();
        assert_eq!(removed.name, "Alice");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn clear_reports_count() {
        let mut s = store();
        assert_eq!(RosterLogic::clear(&mut s).unwrap(), 2);
        assert!(s.is_empty());
    }

    #[test]
    fn map_target_for_position() {
        let s = store();
        let t = RosterLogic::map_target(&s, 1).unwrap();
        assert_eq!(t.name, "Bob");
        assert!(t.embed_url().is_some());
        assert!(RosterLogic::map_target(&s, 2).unwrap().embed_url().is_none());
    }
}
