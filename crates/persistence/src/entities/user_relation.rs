//! User relation entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewUserRelation, RelationKind};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database enum for relation kinds, stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum RelationKindDb {
    Parent,
    Guardian,
    ClassTeacher,
}

impl From<RelationKindDb> for RelationKind {
    fn from(db_kind: RelationKindDb) -> Self {
        match db_kind {
            RelationKindDb::Parent => RelationKind::Parent,
            RelationKindDb::Guardian => RelationKind::Guardian,
            RelationKindDb::ClassTeacher => RelationKind::ClassTeacher,
        }
    }
}

impl From<RelationKind> for RelationKindDb {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Parent => RelationKindDb::Parent,
            RelationKind::Guardian => RelationKindDb::Guardian,
            RelationKind::ClassTeacher => RelationKindDb::ClassTeacher,
        }
    }
}

impl From<RelationKindDb> for SqlValue {
    fn from(db_kind: RelationKindDb) -> Self {
        SqlValue::Text(RelationKind::from(db_kind).as_str().to_string())
    }
}

/// Database row mapping for the users_relations table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRelation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub related_user_id: Uuid,
    pub kind: RelationKindDb,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl UserRelation {
    pub fn new(input: NewUserRelation) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            related_user_id: input.related_user_id,
            kind: input.kind.into(),
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for UserRelation {
    const TABLE: &'static str = "users_relations";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "related_user_id",
        "kind",
        "created_on",
        "modified_on",
        "is_deleted",
        "deleted_on",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            self.id.into(),
            self.user_id.into(),
            self.related_user_id.into(),
            self.kind.into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(UserRelation: deletable, audited);
