//! Identity entities: users, roles and role assignments.

use domain::models::user::normalize_key;
use domain::models::{AuditInfo, DeletionInfo, NewRole, NewUser};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationUser {
    pub id: Uuid,
    pub user_name: String,
    pub normalized_user_name: String,
    pub email: String,
    pub normalized_email: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl ApplicationUser {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            normalized_user_name: normalize_key(&input.user_name),
            normalized_email: normalize_key(&input.email),
            user_name: input.user_name,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            school_id: input.school_id,
            class_id: input.class_id,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for ApplicationUser {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_name",
        "normalized_user_name",
        "email",
        "normalized_email",
        "first_name",
        "last_name",
        "school_id",
        "class_id",
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
            self.user_name.clone().into(),
            self.normalized_user_name.clone().into(),
            self.email.clone().into(),
            self.normalized_email.clone().into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.school_id.into(),
            self.class_id.into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(ApplicationUser: deletable, audited);

/// Database row mapping for the roles table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRole {
    pub id: Uuid,
    pub name: String,
    pub normalized_name: String,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl ApplicationRole {
    pub fn new(input: NewRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            normalized_name: normalize_key(&input.name),
            name: input.name,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for ApplicationRole {
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "normalized_name",
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
            self.name.clone().into(),
            self.normalized_name.clone().into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(ApplicationRole: deletable, audited);

/// Database row mapping for the user_roles table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
}

impl UserRole {
    pub fn new(user_id: Uuid, role_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role_id,
        }
    }
}

impl Entity for UserRole {
    const TABLE: &'static str = "user_roles";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "role_id"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.user_id.into(), self.role_id.into()]
    }
}

impl_capabilities!(UserRole);
