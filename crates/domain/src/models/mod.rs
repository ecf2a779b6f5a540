//! Domain models for GradeCenter.

pub mod capability;
pub mod grade;
pub mod presence;
pub mod school;
pub mod subject;
pub mod user;

pub use capability::{AuditInfo, Audited, Deletable, DeletionInfo};
pub use grade::NewGrade;
pub use presence::{NewPresence, PresenceStatus};
pub use school::{NewClass, NewCurriculum, NewSchool};
pub use subject::NewSubject;
pub use user::{NewRole, NewUser, NewUserRelation, RelationKind};
