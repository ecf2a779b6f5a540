//! Attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Attendance outcome for one lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Present => "present",
            PresenceStatus::Absent => "absent",
            PresenceStatus::Late => "late",
            PresenceStatus::Excused => "excused",
        }
    }

    /// Returns true if the student missed the lesson.
    pub fn counts_as_absence(&self) -> bool {
        matches!(self, PresenceStatus::Absent)
    }
}

impl FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(PresenceStatus::Present),
            "absent" => Ok(PresenceStatus::Absent),
            "late" => Ok(PresenceStatus::Late),
            "excused" => Ok(PresenceStatus::Excused),
            _ => Err(format!("Invalid presence status: {}", s)),
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for recording a student's presence in a lesson.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewPresence {
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub status: PresenceStatus,

    #[validate(custom(function = "shared::validation::validate_not_in_future"))]
    pub occurred_on: DateTime<Utc>,
}
