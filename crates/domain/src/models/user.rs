//! Users, roles and the relations between users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// How one user relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// `user_id` is a parent of `related_user_id`.
    Parent,
    /// `user_id` is a legal guardian of `related_user_id`.
    Guardian,
    /// `user_id` is the class teacher of `related_user_id`.
    ClassTeacher,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Parent => "parent",
            RelationKind::Guardian => "guardian",
            RelationKind::ClassTeacher => "class_teacher",
        }
    }
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parent" => Ok(RelationKind::Parent),
            "guardian" => Ok(RelationKind::Guardian),
            "class_teacher" => Ok(RelationKind::ClassTeacher),
            _ => Err(format!("Invalid relation kind: {}", s)),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for registering a user account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewUser {
    #[validate(length(
        min = 3,
        max = 64,
        message = "User name must be between 3 and 64 characters"
    ))]
    pub user_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,

    pub school_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
}

/// Input for creating a role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewRole {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Role name must be between 1 and 64 characters"
    ))]
    pub name: String,
}

/// Input for linking two users.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_distinct_users"))]
pub struct NewUserRelation {
    pub user_id: Uuid,
    pub related_user_id: Uuid,
    pub kind: RelationKind,
}

fn validate_distinct_users(relation: &NewUserRelation) -> Result<(), validator::ValidationError> {
    if relation.user_id == relation.related_user_id {
        let mut err = validator::ValidationError::new("self_relation");
        err.message = Some("A user cannot be related to themselves".into());
        return Err(err);
    }
    Ok(())
}

/// Normalizes a user name, email or role name for unique lookups.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    fn valid_user() -> NewUser {
        NewUser {
            user_name: Username().fake(),
            email: SafeEmail().fake(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            school_id: None,
            class_id: None,
        }
    }

    #[test]
    fn test_relation_kind_from_str() {
        assert_eq!("parent".parse::<RelationKind>().unwrap(), RelationKind::Parent);
        assert_eq!(
            "Class_Teacher".parse::<RelationKind>().unwrap(),
            RelationKind::ClassTeacher
        );
        assert!("sibling".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_new_user_valid() {
        let mut user = valid_user();
        user.user_name = "ivan.petrov".to_string();
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_new_user_invalid_email() {
        let mut user = valid_user();
        user.user_name = "ivan.petrov".to_string();
        user.email = "not-an-email".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_short_user_name() {
        let mut user = valid_user();
        user.user_name = "iv".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_relation_rejects_self_link() {
        let id = Uuid::new_v4();
        let relation = NewUserRelation {
            user_id: id,
            related_user_id: id,
            kind: RelationKind::Parent,
        };
        assert!(relation.validate().is_err());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Ivan.Petrov@School.bg "), "IVAN.PETROV@SCHOOL.BG");
    }
}
