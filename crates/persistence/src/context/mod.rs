//! The GradeCenter persistence context: one unit of work against the store.
//!
//! A context exposes typed entity sets, tracks the changes made through them
//! and writes them on save. Every save first runs
//! [`interceptor::apply_audit_info_rules`], which turns deletions of
//! deletable entities into tombstones and stamps audit timestamps.

pub mod interceptor;
pub mod set;
mod sql;
pub mod tracker;
mod writer;

use std::sync::Arc;

use shared::clock::Clock;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    ApplicationRole, ApplicationUser, Class, Curriculum, CurriculumSubject, Entity, School,
    Subject, UserGrade, UserPresence, UserRelation, UserRole, UserSubject,
};
use crate::error::ContextError;
use crate::metrics::{record_save_summary, QueryTimer, ALL_TABLES};
use crate::model::Model;

pub use interceptor::{apply_audit_info_rules, RuleSummary};
pub use set::EntitySet;
pub use tracker::{ChangeTracker, EntryState, TrackedEntity, TrackedEntry};

/// Whether a successful save detaches the saved entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AcceptChanges {
    /// Detach everything after the write commits.
    #[default]
    Yes,
    /// Keep the rewritten entries tracked until
    /// [`GradeCenterContext::accept_all_changes`] is called.
    No,
}

/// A unit of work. Not shared between tasks.
#[derive(Debug)]
pub struct GradeCenterContext {
    pool: SqlitePool,
    model: Arc<Model>,
    clock: Arc<dyn Clock>,
    tracker: ChangeTracker,
}

impl GradeCenterContext {
    pub fn new(pool: SqlitePool, model: Arc<Model>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            model,
            clock,
            tracker: ChangeTracker::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The set of any registered entity type.
    pub fn set<T: Entity>(&mut self) -> EntitySet<'_, T> {
        EntitySet::new(self)
    }

    pub fn schools(&mut self) -> EntitySet<'_, School> {
        self.set()
    }

    pub fn classes(&mut self) -> EntitySet<'_, Class> {
        self.set()
    }

    pub fn curriculums(&mut self) -> EntitySet<'_, Curriculum> {
        self.set()
    }

    pub fn subjects(&mut self) -> EntitySet<'_, Subject> {
        self.set()
    }

    pub fn curriculums_subjects(&mut self) -> EntitySet<'_, CurriculumSubject> {
        self.set()
    }

    pub fn users_relations(&mut self) -> EntitySet<'_, UserRelation> {
        self.set()
    }

    pub fn users_grades(&mut self) -> EntitySet<'_, UserGrade> {
        self.set()
    }

    pub fn users_subjects(&mut self) -> EntitySet<'_, UserSubject> {
        self.set()
    }

    pub fn users_presences(&mut self) -> EntitySet<'_, UserPresence> {
        self.set()
    }

    pub fn users(&mut self) -> EntitySet<'_, ApplicationUser> {
        self.set()
    }

    pub fn roles(&mut self) -> EntitySet<'_, ApplicationRole> {
        self.set()
    }

    pub fn user_roles(&mut self) -> EntitySet<'_, UserRole> {
        self.set()
    }

    /// Pending entries in tracking order.
    pub fn entries(&self) -> &[TrackedEntry] {
        self.tracker.entries()
    }

    /// The tracked value of `T` with the given id, as last rewritten by a
    /// save.
    pub fn tracked<T: Entity>(&self, id: Uuid) -> Option<&T> {
        self.tracker.find(id)
    }

    pub fn state_of<T: Entity>(&self, id: Uuid) -> Option<EntryState> {
        self.tracker.state_of::<T>(id)
    }

    pub fn has_changes(&self) -> bool {
        self.tracker.has_changes()
    }

    /// Detaches every tracked entry.
    pub fn accept_all_changes(&mut self) {
        self.tracker.clear();
    }

    /// Saves all pending changes and detaches them.
    pub async fn save_changes(&mut self) -> Result<usize, ContextError> {
        self.save(AcceptChanges::Yes, None).await
    }

    pub async fn save_changes_with(
        &mut self,
        accept: AcceptChanges,
    ) -> Result<usize, ContextError> {
        self.save(accept, None).await
    }

    /// Saves like [`GradeCenterContext::save_changes_with`], giving up when
    /// `token` is cancelled.
    ///
    /// The change set is rewritten before the token is looked at. The token
    /// is honored up to the commit: a cancelled save rolls back and leaves the
    /// rewritten entries tracked, while a save whose commit has started runs
    /// to completion.
    pub async fn save_changes_until_cancelled(
        &mut self,
        accept: AcceptChanges,
        token: &CancellationToken,
    ) -> Result<usize, ContextError> {
        self.save(accept, Some(token)).await
    }

    async fn save(
        &mut self,
        accept: AcceptChanges,
        token: Option<&CancellationToken>,
    ) -> Result<usize, ContextError> {
        let now = self.clock.now();
        let summary = apply_audit_info_rules(self.tracker.entries_mut(), now);

        debug!(
            entries = self.tracker.len(),
            tombstoned = summary.tombstoned,
            created = summary.created,
            modified = summary.modified,
            "Saving changes"
        );

        if !self.tracker.has_changes() {
            if token.is_some_and(|t| t.is_cancelled()) {
                return Err(ContextError::Cancelled);
            }
            return Ok(0);
        }

        let timer = QueryTimer::new("save_changes", ALL_TABLES);
        let result = writer::flush(&self.pool, self.tracker.entries(), token).await;
        timer.record();

        let affected = result?;
        record_save_summary(&summary);
        debug!(rows = affected, "Changes saved");

        if accept == AcceptChanges::Yes {
            self.tracker.clear();
        }
        Ok(affected)
    }
}
