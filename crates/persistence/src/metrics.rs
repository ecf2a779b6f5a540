//! Persistence metrics.
//!
//! Everything goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops.

use metrics::{counter, gauge, histogram};
use sqlx::SqlitePool;
use std::time::Instant;

use crate::context::RuleSummary;

/// Table label used for statements that span several tables, such as a save.
pub const ALL_TABLES: &str = "all";

/// Duration of one entity-set query or one save.
pub fn record_query_duration(operation: &'static str, table: &'static str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "operation" => operation,
        "table" => table
    )
    .record(duration_secs);
}

/// Snapshot of the pool, labelled by connection state.
pub fn record_pool_metrics(pool: &SqlitePool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_pool_connections", "state" => "active")
        .set(size.saturating_sub(idle) as f64);
    gauge!("database_pool_connections", "state" => "idle").set(idle as f64);
}

/// What the save rules did in one committed save.
pub fn record_save_summary(summary: &RuleSummary) {
    counter!("persistence_rows_tombstoned_total").increment(summary.tombstoned as u64);
    counter!("persistence_audit_stamps_total", "kind" => "created")
        .increment(summary.created as u64);
    counter!("persistence_audit_stamps_total", "kind" => "modified")
        .increment(summary.modified as u64);
}

/// Times one operation against one table.
///
/// ```ignore
/// let timer = QueryTimer::new("list", Subject::TABLE);
/// let rows = query.fetch_all(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    operation: &'static str,
    table: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(operation: &'static str, table: &'static str) -> Self {
        Self {
            operation,
            table,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time and returns it in seconds.
    pub fn record(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        record_query_duration(self.operation, self.table, elapsed);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_labels() {
        let timer = QueryTimer::new("find", "subjects");
        assert_eq!(timer.operation, "find");
        assert_eq!(timer.table, "subjects");
    }

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        assert!(QueryTimer::new("save_changes", ALL_TABLES).record() >= 0.0);
        record_save_summary(&RuleSummary {
            tombstoned: 1,
            created: 2,
            modified: 0,
        });
    }
}
