//! Named-table profile store simulating the remote backend.
//!
//! # Responsibility
//! - Hold table data in memory and perform insert/select/update.
//! - Assign identifiers on insert and announce every write on the bus.
//!
//! # Invariants
//! - `insert` always assigns a fresh id; caller-supplied ids are ignored.
//! - Every successful insert/update publishes exactly one event.
//! - A no-match update publishes nothing and returns `None`.

use crate::event::{Event, EventBus};
use crate::ids;
use crate::model::profile::{ProfilePatch, TeacherProfile};
use log::debug;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// The only table the marketplace uses in practice.
pub const TEACHERS_TABLE: &str = "teachers";

/// Field an update matches records against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Id,
    Name,
    CreatedBy,
}

impl MatchField {
    fn matches(self, profile: &TeacherProfile, value: &str) -> bool {
        match self {
            Self::Id => profile.id == value,
            Self::Name => profile.name == value,
            Self::CreatedBy => profile.created_by.as_deref() == Some(value),
        }
    }
}

/// In-memory document store keyed by logical table name.
pub struct TableStore {
    bus: Rc<EventBus>,
    tables: RefCell<BTreeMap<String, Vec<TeacherProfile>>>,
}

impl TableStore {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            tables: RefCell::new(BTreeMap::new()),
        }
    }

    /// Returns all records of `table` in insertion order.
    pub fn select(&self, table: &str) -> Vec<TeacherProfile> {
        self.tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Stores the record under a freshly assigned id and publishes
    /// [`Event::Inserted`]. Returns the stored record, id included.
    pub fn insert(&self, table: &str, mut profile: TeacherProfile) -> TeacherProfile {
        profile.id = ids::record_id();
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(profile.clone());

        debug!(
            "event=store_insert module=store table={} id={}",
            table, profile.id
        );
        self.bus.publish(Event::Inserted {
            table: table.to_string(),
            record: profile.clone(),
        });
        profile
    }

    /// Merges the patch onto the first record whose `field` equals `value`,
    /// publishes [`Event::Updated`], and returns the merged record.
    ///
    /// Returns `None` without publishing when no record matches, so callers
    /// can tell "no match" from success without re-reading the table.
    pub fn update(
        &self,
        table: &str,
        field: MatchField,
        value: &str,
        patch: &ProfilePatch,
    ) -> Option<TeacherProfile> {
        let merged = {
            let mut tables = self.tables.borrow_mut();
            let records = tables.get_mut(table)?;
            let target = records
                .iter_mut()
                .find(|record| field.matches(record, value))?;
            patch.apply_to(target);
            target.clone()
        };

        debug!(
            "event=store_update module=store table={} id={}",
            table, merged.id
        );
        self.bus.publish(Event::Updated {
            table: table.to_string(),
            record: merged.clone(),
        });
        Some(merged)
    }

    /// Swaps the table contents without publishing. Load path only: the
    /// reconciler uses this to seed the table with an already-merged set.
    pub fn replace_all(&self, table: &str, records: Vec<TeacherProfile>) {
        self.tables
            .borrow_mut()
            .insert(table.to_string(), records);
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchField, TableStore, TEACHERS_TABLE};
    use crate::event::EventBus;
    use crate::model::profile::ProfilePatch;
    use crate::model::seed::seed_profiles;

    #[test]
    fn insert_assigns_a_fresh_id() {
        let bus = EventBus::new();
        let store = TableStore::new(bus);

        let seeded = seed_profiles().remove(0);
        let stored = store.insert(TEACHERS_TABLE, seeded.clone());

        assert_ne!(stored.id, seeded.id);
        assert_eq!(store.select(TEACHERS_TABLE).len(), 1);
    }

    #[test]
    fn update_without_match_returns_none() {
        let bus = EventBus::new();
        let store = TableStore::new(bus);
        store.replace_all(TEACHERS_TABLE, seed_profiles());

        let patch = ProfilePatch {
            bio: Some("updated".to_string()),
            ..ProfilePatch::default()
        };
        let merged = store.update(TEACHERS_TABLE, MatchField::Id, "no-such-id", &patch);
        assert!(merged.is_none());
    }
}
