//! SQL text for entity reads and writes.
//!
//! Parameters use SQLite's numbered `?N` form so the same value order can be
//! reused between statement and bindings.

use crate::entities::{
    SqlValue, CREATED_ON_COLUMN, DELETED_ON_COLUMN, ID_COLUMN, IS_DELETED_COLUMN,
};

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        let joined = conditions
            .iter()
            .map(|c| format!("({})", c))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {}", joined)
    }
}

/// `SELECT` of `columns`, in insertion order.
pub(crate) fn select_statement(table: &str, columns: &[&str], conditions: &[String]) -> String {
    format!(
        "SELECT {} FROM {}{} ORDER BY rowid",
        columns.join(", "),
        table,
        where_clause(conditions)
    )
}

pub(crate) fn count_statement(table: &str, conditions: &[String]) -> String {
    format!("SELECT COUNT(*) FROM {}{}", table, where_clause(conditions))
}

/// `INSERT` binding every column in order.
pub(crate) fn insert_statement(table: &str, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

fn is_written_on_update(column: &str) -> bool {
    column != ID_COLUMN && column != CREATED_ON_COLUMN
}

fn assignment(column: &str, position: usize) -> String {
    match column {
        IS_DELETED_COLUMN => format!("{0} = MAX({0}, ?{1})", column, position),
        DELETED_ON_COLUMN => format!("{0} = COALESCE({0}, ?{1})", column, position),
        _ => format!("{} = ?{}", column, position),
    }
}

/// `UPDATE` of every column except `id` and `created_on`, keyed by `id`.
///
/// The soft-delete columns only move forward: a stored tombstone keeps
/// `is_deleted` and its first `deleted_on` whatever the bound values are.
///
/// Bind with [`update_values`].
pub(crate) fn update_statement(table: &str, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .filter(|c| is_written_on_update(c))
        .enumerate()
        .map(|(i, c)| assignment(c, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        table,
        assignments.join(", "),
        ID_COLUMN,
        assignments.len() + 1
    )
}

/// Reorders full-row `values` into the binding order of [`update_statement`].
pub(crate) fn update_values(columns: &[&str], values: Vec<SqlValue>) -> Vec<SqlValue> {
    let mut id = SqlValue::Null;
    let mut ordered = Vec::with_capacity(values.len());
    for (column, value) in columns.iter().zip(values) {
        if *column == ID_COLUMN {
            id = value;
        } else if is_written_on_update(column) {
            ordered.push(value);
        }
    }
    ordered.push(id);
    ordered
}

pub(crate) fn delete_statement(table: &str) -> String {
    format!("DELETE FROM {} WHERE {} = ?1", table, ID_COLUMN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const COLUMNS: &[&str] = &[
        "id",
        "name",
        "created_on",
        "modified_on",
        "is_deleted",
        "deleted_on",
    ];

    #[test]
    fn test_select_without_conditions() {
        assert_eq!(
            select_statement("subjects", &["id", "name"], &[]),
            "SELECT id, name FROM subjects ORDER BY rowid"
        );
    }

    #[test]
    fn test_select_wraps_each_condition() {
        let sql = select_statement(
            "subjects",
            &["id"],
            &["id = ?1".to_string(), "is_deleted = 0".to_string()],
        );
        assert_eq!(
            sql,
            "SELECT id FROM subjects WHERE (id = ?1) AND (is_deleted = 0) ORDER BY rowid"
        );
    }

    #[test]
    fn test_count_statement() {
        assert_eq!(
            count_statement("subjects", &["is_deleted = 0".to_string()]),
            "SELECT COUNT(*) FROM subjects WHERE (is_deleted = 0)"
        );
    }

    #[test]
    fn test_insert_statement() {
        assert_eq!(
            insert_statement("user_roles", &["id", "user_id", "role_id"]),
            "INSERT INTO user_roles (id, user_id, role_id) VALUES (?1, ?2, ?3)"
        );
    }

    #[test]
    fn test_update_never_writes_id_or_created_on() {
        let sql = update_statement("subjects", COLUMNS);
        assert!(sql.starts_with("UPDATE subjects SET name = ?1, modified_on = ?2, "));
        assert!(sql.ends_with(" WHERE id = ?5"));
        assert!(!sql.contains("created_on"));
    }

    #[test]
    fn test_update_cannot_clear_a_tombstone() {
        let sql = update_statement("subjects", COLUMNS);
        assert!(sql.contains("is_deleted = MAX(is_deleted, ?3)"));
        assert!(sql.contains("deleted_on = COALESCE(deleted_on, ?4)"));
    }

    #[test]
    fn test_update_of_plain_table_has_no_soft_delete_guards() {
        assert_eq!(
            update_statement("user_roles", &["id", "user_id", "role_id"]),
            "UPDATE user_roles SET user_id = ?1, role_id = ?2 WHERE id = ?3"
        );
    }

    #[test]
    fn test_update_values_put_id_last() {
        let id = Uuid::new_v4();
        let values = vec![
            SqlValue::Uuid(id),
            SqlValue::from("Math"),
            SqlValue::Null,
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Null,
        ];
        let ordered = update_values(COLUMNS, values);
        assert_eq!(ordered.len(), 5);
        assert_eq!(ordered[0], SqlValue::from("Math"));
        assert_eq!(ordered[2], SqlValue::Bool(true));
        assert_eq!(ordered[4], SqlValue::Uuid(id));
    }

    #[test]
    fn test_delete_statement() {
        assert_eq!(
            delete_statement("users_presences"),
            "DELETE FROM users_presences WHERE id = ?1"
        );
    }
}
