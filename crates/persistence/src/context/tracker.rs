//! In-memory change tracking for one unit of work.

use std::any::Any;
use std::fmt;

use domain::models::{Audited, Deletable};
use uuid::Uuid;

use crate::entities::{Entity, SqlValue};

/// Pending operation for a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Will be inserted.
    Added,
    /// Will be updated.
    Modified,
    /// Will be deleted (or tombstoned, for deletable entities).
    Deleted,
    /// Attached without pending changes.
    Unchanged,
}

/// Object-safe view over any [`Entity`], used to keep entities of different
/// types in one change set.
pub trait TrackedEntity: Send + Sync + fmt::Debug {
    fn table_name(&self) -> &'static str;

    fn entity_id(&self) -> Uuid;

    fn column_names(&self) -> &'static [&'static str];

    fn column_values(&self) -> Vec<SqlValue>;

    fn deletable_mut(&mut self) -> Option<&mut dyn Deletable>;

    fn audited_mut(&mut self) -> Option<&mut dyn Audited>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Entity> TrackedEntity for T {
    fn table_name(&self) -> &'static str {
        T::TABLE
    }

    fn entity_id(&self) -> Uuid {
        Entity::id(self)
    }

    fn column_names(&self) -> &'static [&'static str] {
        T::COLUMNS
    }

    fn column_values(&self) -> Vec<SqlValue> {
        Entity::values(self)
    }

    fn deletable_mut(&mut self) -> Option<&mut dyn Deletable> {
        self.as_deletable_mut()
    }

    fn audited_mut(&mut self) -> Option<&mut dyn Audited> {
        self.as_audited_mut()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One tracked entity and its pending operation.
#[derive(Debug)]
pub struct TrackedEntry {
    pub(crate) state: EntryState,
    pub(crate) entity: Box<dyn TrackedEntity>,
}

impl TrackedEntry {
    pub(crate) fn new(state: EntryState, entity: Box<dyn TrackedEntity>) -> Self {
        Self { state, entity }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn entity(&self) -> &dyn TrackedEntity {
        self.entity.as_ref()
    }

    pub fn table(&self) -> &'static str {
        self.entity.table_name()
    }

    pub fn id(&self) -> Uuid {
        self.entity.entity_id()
    }

    fn is_for(&self, table: &str, id: Uuid) -> bool {
        self.table() == table && self.id() == id
    }
}

/// Ordered set of pending changes, keyed by (table, id).
///
/// Entries are flushed in the order they were first tracked.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    entries: Vec<TrackedEntry>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `entity` for `state`, merging with an existing entry for the
    /// same row:
    ///
    /// - `Added` replaces whatever was tracked.
    /// - `Modified` keeps a pending `Added` (with the new value), otherwise
    ///   becomes `Modified`.
    /// - `Deleted` on a pending `Added` drops the entry; the row never
    ///   reaches the store.
    /// - `Unchanged` leaves an existing entry alone.
    pub fn track(&mut self, entity: Box<dyn TrackedEntity>, state: EntryState) {
        let table = entity.table_name();
        let id = entity.entity_id();

        let Some(position) = self.entries.iter().position(|e| e.is_for(table, id)) else {
            self.entries.push(TrackedEntry::new(state, entity));
            return;
        };

        let existing = self.entries[position].state;
        match (existing, state) {
            (_, EntryState::Unchanged) => {}
            (EntryState::Added, EntryState::Deleted) => {
                self.entries.remove(position);
            }
            (EntryState::Added, EntryState::Modified) => {
                self.entries[position].entity = entity;
            }
            (_, next) => {
                self.entries[position] = TrackedEntry::new(next, entity);
            }
        }
    }

    pub fn entries(&self) -> &[TrackedEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [TrackedEntry] {
        &mut self.entries
    }

    /// The tracked value of `T` with the given id.
    pub fn find<T: Entity>(&self, id: Uuid) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.is_for(T::TABLE, id))
            .and_then(|e| e.entity.as_any().downcast_ref::<T>())
    }

    pub fn state_of<T: Entity>(&self, id: Uuid) -> Option<EntryState> {
        self.entries
            .iter()
            .find(|e| e.is_for(T::TABLE, id))
            .map(|e| e.state)
    }

    /// Returns true if anything would be written by a save.
    pub fn has_changes(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.state != EntryState::Unchanged)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detaches every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
