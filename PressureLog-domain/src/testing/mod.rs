// Testing utilities for the domain layer
// Available to unit tests and, with the "mock" feature, to downstream crates

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pressure_log_data::models::StoredAccount;
use pressure_log_data::store::{InMemoryStore, KeyValueStore, StoreError};
use rand::Rng;

use crate::auth::Session;
use crate::entities::account::User;
use crate::entities::blood_pressure::{NewReading, Reading, SubjectKind};
use crate::entities::dependent::{Dependent, NewDependent};
use crate::services::ids::{generate_unique_id, READING_ID_PREFIX};

/// Fixed reference instant used by the fixtures
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap()
}

/// The demo account that is always available for login
pub fn demo_account() -> StoredAccount {
    StoredAccount {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        password: "password123".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Domain view of the demo account
pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Session of the demo account
pub fn test_session() -> Session {
    Session::new(test_user())
}

/// Owner reading taken at `timestamp`
pub fn reading_at_time(systolic: u16, diastolic: u16, timestamp: DateTime<Utc>) -> Reading {
    Reading {
        id: generate_unique_id(READING_ID_PREFIX),
        systolic,
        diastolic,
        pulse: Some(72),
        timestamp,
        notes: None,
        owner_id: "user-1".to_string(),
        subject_id: "user-1".to_string(),
        subject_kind: SubjectKind::Owner,
    }
}

/// Owner reading taken `days_ago` days before [`fixture_now`]
pub fn reading_at(systolic: u16, diastolic: u16, days_ago: i64) -> Reading {
    reading_at_time(systolic, diastolic, fixture_now() - Duration::days(days_ago))
}

pub fn reading_with_pulse(systolic: u16, diastolic: u16, pulse: Option<u16>, days_ago: i64) -> Reading {
    Reading {
        pulse,
        ..reading_at(systolic, diastolic, days_ago)
    }
}

/// Valid reading request for `subject_id`
pub fn new_reading(subject_id: &str, subject_kind: SubjectKind) -> NewReading {
    NewReading {
        systolic: 120,
        diastolic: 80,
        pulse: Some(72),
        timestamp: fixture_now(),
        notes: None,
        subject_id: subject_id.to_string(),
        subject_kind,
    }
}

pub fn sarah_request() -> NewDependent {
    NewDependent {
        name: "Sarah Doe".to_string(),
        relationship: "Spouse".to_string(),
        age: Some(35),
        gender: Some("Female".to_string()),
    }
}

pub fn sarah(owner_id: &str) -> Dependent {
    Dependent {
        id: "family-1".to_string(),
        name: "Sarah Doe".to_string(),
        relationship: "Spouse".to_string(),
        age: Some(35),
        gender: Some("Female".to_string()),
        owner_id: owner_id.to_string(),
    }
}

pub fn michael(owner_id: &str) -> Dependent {
    Dependent {
        id: "family-2".to_string(),
        name: "Michael Doe".to_string(),
        relationship: "Son".to_string(),
        age: Some(12),
        gender: Some("Male".to_string()),
        owner_id: owner_id.to_string(),
    }
}

/// Generate `count` plausible readings for one subject, one per day going back from `now`
///
/// Values stay mostly in the normal to stage 1 range: systolic 110-139,
/// diastolic 70-89, pulse 60-79.
pub fn generate_mock_readings<R: Rng>(
    rng: &mut R,
    owner_id: &str,
    subject_id: &str,
    subject_kind: SubjectKind,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Reading> {
    (0..count)
        .map(|day| Reading {
            id: generate_unique_id(READING_ID_PREFIX),
            systolic: rng.gen_range(110..140),
            diastolic: rng.gen_range(70..90),
            pulse: Some(rng.gen_range(60..80)),
            timestamp: now - Duration::days(day as i64),
            notes: None,
            owner_id: owner_id.to_string(),
            subject_id: subject_id.to_string(),
            subject_kind,
        })
        .collect()
}

/// In-memory store whose writes to selected keys fail
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `set` or `remove` of `key` fail
    pub fn fail_writes_to(&self, key: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(key.to_string());
        }
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        let failing = self.failing.lock()?;
        if failing.contains(key) {
            return Err(StoreError::Lock(format!("writes to {} are disabled", key)));
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

#[cfg(test)]
mockall::mock! {
    pub Store {}

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
        fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
        fn remove(&self, key: &str) -> Result<(), StoreError>;
    }
}

// Initialize tracing once for all tests
#[cfg(test)]
static INIT: std::sync::Once = std::sync::Once::new();

#[cfg(test)]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
