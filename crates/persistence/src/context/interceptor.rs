//! Save-time rewriting of the pending change set.
//!
//! Runs before every flush. Pure in-memory: no I/O and no failure modes.

use chrono::{DateTime, Utc};

use super::tracker::{EntryState, TrackedEntry};

/// What the rules changed in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleSummary {
    /// Deletes turned into tombstone updates.
    pub tombstoned: usize,
    /// Inserts that received `created_on`.
    pub created: usize,
    /// Writes that received `modified_on`.
    pub modified: usize,
}

/// Applies the soft-delete and audit rules to every entry, stamping with
/// `now`.
///
/// 1. A delete of a deletable entity becomes an update that sets
///    `is_deleted` and `deleted_on`.
/// 2. Otherwise an insert or update of an audited entity gets `created_on`
///    (insert with no creation time yet) or `modified_on` (everything else).
///
/// Rule 1 wins: a tombstoned entity never has `modified_on` bumped.
pub fn apply_audit_info_rules(entries: &mut [TrackedEntry], now: DateTime<Utc>) -> RuleSummary {
    let mut summary = RuleSummary::default();

    for entry in entries.iter_mut() {
        match entry.state {
            EntryState::Deleted => {
                if let Some(deletable) = entry.entity.deletable_mut() {
                    deletable.deletion_mut().mark_deleted(now);
                    entry.state = EntryState::Modified;
                    summary.tombstoned += 1;
                }
            }
            EntryState::Added | EntryState::Modified => {
                if let Some(audited) = entry.entity.audited_mut() {
                    let audit = audited.audit_info_mut();
                    if entry.state == EntryState::Added && !audit.is_created() {
                        audit.created_on = Some(now);
                        summary.created += 1;
                    } else {
                        audit.modified_on = Some(now);
                        summary.modified += 1;
                    }
                }
            }
            EntryState::Unchanged => {}
        }
    }

    summary
}
