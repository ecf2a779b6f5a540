//! Common test utilities for integration tests.
//!
//! Every test gets its own in-memory SQLite database with the schema migrated
//! and a manual clock, so saved timestamps are predictable.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::models::{NewRole, NewSubject, NewUser};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::config::DatabaseConfig;
use persistence::entities::{ApplicationRole, ApplicationUser, Subject};
use persistence::{Database, GradeCenterContext};
use shared::clock::ManualClock;
use uuid::Uuid;

/// Start of the first lesson of the school year; the clock starts here.
pub fn first_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 16, 8, 0, 0).unwrap()
}

pub struct TestDb {
    pub database: Database,
    pub clock: Arc<ManualClock>,
}

impl TestDb {
    pub fn context(&self) -> GradeCenterContext {
        self.database.context()
    }

    /// Moves the clock forward and returns the new time.
    pub fn tick(&self, minutes: i64) -> DateTime<Utc> {
        self.clock.advance(Duration::minutes(minutes));
        self.now()
    }

    pub fn now(&self) -> DateTime<Utc> {
        use shared::clock::Clock;
        self.clock.now()
    }
}

/// Create a migrated in-memory database.
pub async fn create_test_db() -> TestDb {
    let clock = Arc::new(ManualClock::new(first_day()));
    let database = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open test database")
        .with_clock(clock.clone());
    database
        .initialize()
        .await
        .expect("Failed to initialize test database");

    TestDb { database, clock }
}

pub fn fake_user() -> ApplicationUser {
    let suffix = &Uuid::new_v4().simple().to_string()[..8];
    let user_name: String = Username().fake();
    let email: String = SafeEmail().fake();
    ApplicationUser::new(NewUser {
        user_name: format!("{}_{}", user_name, suffix),
        email: format!("{}.{}", suffix, email),
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        school_id: None,
        class_id: None,
    })
}

pub fn subject(name: &str) -> Subject {
    Subject::new(NewSubject {
        name: name.to_string(),
    })
}

pub fn role(name: &str) -> ApplicationRole {
    ApplicationRole::new(NewRole {
        name: name.to_string(),
    })
}

/// Save a fresh user and return it as stored.
pub async fn seed_user(db: &TestDb) -> ApplicationUser {
    let user = fake_user();
    let mut context = db.context();
    context.users().add(user.clone());
    context.save_changes().await.expect("Failed to seed user");
    context
        .users()
        .find(user.id)
        .await
        .expect("Failed to load user")
        .expect("Seeded user not found")
}

/// Save a subject and return it as stored.
pub async fn seed_subject(db: &TestDb, name: &str) -> Subject {
    let subject = subject(name);
    let mut context = db.context();
    context.subjects().add(subject.clone());
    context.save_changes().await.expect("Failed to seed subject");
    context
        .subjects()
        .find(subject.id)
        .await
        .expect("Failed to load subject")
        .expect("Seeded subject not found")
}
