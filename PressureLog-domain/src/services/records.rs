//! Readings and dependents of the signed-in account
//!
//! [`RecordService`] keeps both collections in memory and writes the whole
//! collection back to the store after every change. A change is only applied
//! in memory once the write has succeeded.

use pressure_log_data::repository::{DependentRepository, ReadingRepository, RepositoryError};
use pressure_log_data::store::KeyValueStore;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::entities::account::User;
use crate::entities::blood_pressure::{NewReading, Reading, SubjectKind};
use crate::entities::conversions::{
    convert_to_data_dependent, convert_to_data_reading, convert_to_domain_dependent,
    convert_to_domain_reading, ConversionError,
};
use crate::entities::dependent::{Dependent, DependentUpdate, NewDependent};
use crate::services::grouping::sort_by_time;
use crate::services::ids::{generate_unique_id, DEPENDENT_ID_PREFIX, READING_ID_PREFIX};
use crate::services::validation::validate_input;

/// Record service errors
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input rejected by validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record with the given id
    #[error("Not found: {0}")]
    NotFound(String),

    /// A reading referenced a person that is not part of the account
    #[error("Unknown {kind} subject: {subject_id}")]
    UnknownSubject {
        subject_id: String,
        kind: SubjectKind,
    },

    /// A stored record could not be read
    #[error("Corrupt record: {0}")]
    CorruptRecord(#[from] ConversionError),

    /// Store or snapshot failure, passed through unchanged
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Which readings to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    All,
    /// The account owner's own readings
    Me,
    /// Readings of one person, by subject id
    Person(String),
}

/// Result of deleting a dependent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub dependent: Dependent,
    pub readings_removed: usize,
}

/// Readings and dependents of one account
pub struct RecordService<S> {
    owner: User,
    reading_repo: ReadingRepository<S>,
    dependent_repo: DependentRepository<S>,
    readings: Vec<Reading>,
    dependents: Vec<Dependent>,
}

impl<S: KeyValueStore + Clone> RecordService<S> {
    /// Load the collections of the session's account
    pub fn open(store: S, session: &Session) -> Result<Self, RecordError> {
        let owner = session.user().clone();
        let reading_repo = ReadingRepository::new(store.clone());
        let dependent_repo = DependentRepository::new(store);

        let readings = reading_repo
            .load(&owner.id)?
            .into_iter()
            .map(convert_to_domain_reading)
            .collect::<Result<Vec<_>, _>>()?;
        let dependents = dependent_repo
            .load(&owner.id)?
            .into_iter()
            .map(convert_to_domain_dependent)
            .collect();

        let service = Self {
            owner,
            reading_repo,
            dependent_repo,
            readings,
            dependents,
        };
        debug!(
            "Opened records for {}: {} readings, {} dependents",
            service.owner.id,
            service.readings.len(),
            service.dependents.len()
        );
        Ok(service)
    }
}

impl<S: KeyValueStore> RecordService<S> {
    /// Account the service was opened for
    pub fn owner(&self) -> &User {
        &self.owner
    }

    /// All readings, newest entry first
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Readings recorded by `owner_id`
    pub fn list_readings(&self, owner_id: &str) -> Vec<Reading> {
        self.readings
            .iter()
            .filter(|reading| reading.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Record a new reading for the owner or one of the dependents
    pub fn add_reading(&mut self, request: NewReading) -> Result<Reading, RecordError> {
        if let Err(message) = validate_input(&request) {
            warn!("Rejected reading: {}", message);
            return Err(RecordError::Validation(message));
        }
        if !self.subject_exists(&request.subject_id, request.subject_kind) {
            warn!(
                "Rejected reading for unknown {} {}",
                request.subject_kind, request.subject_id
            );
            return Err(RecordError::UnknownSubject {
                subject_id: request.subject_id,
                kind: request.subject_kind,
            });
        }

        let reading = Reading {
            id: generate_unique_id(READING_ID_PREFIX),
            systolic: request.systolic,
            diastolic: request.diastolic,
            pulse: request.pulse,
            timestamp: request.timestamp,
            notes: request
                .notes
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty()),
            owner_id: self.owner.id.clone(),
            subject_id: request.subject_id,
            subject_kind: request.subject_kind,
        };

        let mut readings = Vec::with_capacity(self.readings.len() + 1);
        readings.push(reading.clone());
        readings.extend(self.readings.iter().cloned());
        self.persist_readings(&readings)?;
        self.readings = readings;

        info!("Added reading {} for {}", reading.id, reading.subject_id);
        Ok(reading)
    }

    /// Delete a reading; returns false if no reading has that id
    pub fn delete_reading(&mut self, id: &str) -> Result<bool, RecordError> {
        if !self.readings.iter().any(|reading| reading.id == id) {
            return Ok(false);
        }

        let readings: Vec<Reading> = self
            .readings
            .iter()
            .filter(|reading| reading.id != id)
            .cloned()
            .collect();
        self.persist_readings(&readings)?;
        self.readings = readings;

        info!("Deleted reading {}", id);
        Ok(true)
    }

    /// All dependents, in the order they were added
    pub fn dependents(&self) -> &[Dependent] {
        &self.dependents
    }

    /// Dependents of `owner_id`
    pub fn list_dependents(&self, owner_id: &str) -> Vec<Dependent> {
        self.dependents
            .iter()
            .filter(|dependent| dependent.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn add_dependent(&mut self, request: NewDependent) -> Result<Dependent, RecordError> {
        if let Err(message) = validate_input(&request) {
            warn!("Rejected dependent: {}", message);
            return Err(RecordError::Validation(message));
        }

        let dependent = Dependent {
            id: generate_unique_id(DEPENDENT_ID_PREFIX),
            name: request.name,
            relationship: request.relationship,
            age: request.age,
            gender: request.gender,
            owner_id: self.owner.id.clone(),
        };

        let mut dependents = self.dependents.clone();
        dependents.push(dependent.clone());
        self.persist_dependents(&dependents)?;
        self.dependents = dependents;

        info!("Added dependent {}", dependent.id);
        Ok(dependent)
    }

    /// Merge `update` into an existing dependent
    pub fn update_dependent(
        &mut self,
        id: &str,
        update: DependentUpdate,
    ) -> Result<Dependent, RecordError> {
        if let Err(message) = validate_input(&update) {
            warn!("Rejected dependent update: {}", message);
            return Err(RecordError::Validation(message));
        }

        let index = self
            .dependents
            .iter()
            .position(|dependent| dependent.id == id)
            .ok_or_else(|| RecordError::NotFound(format!("Dependent with ID {} not found", id)))?;

        let mut dependents = self.dependents.clone();
        dependents[index].apply(update);
        self.persist_dependents(&dependents)?;
        let updated = dependents[index].clone();
        self.dependents = dependents;

        info!("Updated dependent {}", id);
        Ok(updated)
    }

    /// Delete a dependent together with their readings
    ///
    /// The readings are removed and written first, then the dependent. If the
    /// second write fails the readings stay deleted.
    pub fn delete_dependent(&mut self, id: &str) -> Result<CascadeOutcome, RecordError> {
        let dependent = self
            .dependents
            .iter()
            .find(|dependent| dependent.id == id)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(format!("Dependent with ID {} not found", id)))?;

        let readings_removed = self.remove_readings_of(id)?;

        let dependents: Vec<Dependent> = self
            .dependents
            .iter()
            .filter(|candidate| candidate.id != id)
            .cloned()
            .collect();
        self.persist_dependents(&dependents)?;
        self.dependents = dependents;

        info!(
            "Deleted dependent {} and {} of their readings",
            id, readings_removed
        );
        Ok(CascadeOutcome {
            dependent,
            readings_removed,
        })
    }

    /// Display name for the subject of a reading
    pub fn resolve_subject_name(&self, subject_id: &str, kind: SubjectKind) -> String {
        match kind {
            SubjectKind::Owner if subject_id == self.owner.id => format!("{} (Me)", self.owner.name),
            SubjectKind::Dependent => self
                .dependents
                .iter()
                .find(|dependent| dependent.id == subject_id)
                .map(|dependent| dependent.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            SubjectKind::Owner => "Unknown".to_string(),
        }
    }

    /// Readings matching `filter`, in stored order
    pub fn readings_for(&self, filter: &SubjectFilter) -> Vec<Reading> {
        self.readings
            .iter()
            .filter(|reading| match filter {
                SubjectFilter::All => true,
                SubjectFilter::Me => {
                    reading.subject_kind == SubjectKind::Owner && reading.subject_id == self.owner.id
                }
                SubjectFilter::Person(id) => reading.subject_id == *id,
            })
            .cloned()
            .collect()
    }

    pub fn reading_count_for_dependent(&self, id: &str) -> usize {
        self.readings
            .iter()
            .filter(|reading| is_reading_of_dependent(reading, id))
            .count()
    }

    /// The `limit` most recent readings by timestamp
    pub fn recent_readings(&self, limit: usize) -> Vec<Reading> {
        let mut newest_first = sort_by_time(&self.readings, false);
        newest_first.truncate(limit);
        newest_first
    }

    fn subject_exists(&self, subject_id: &str, kind: SubjectKind) -> bool {
        match kind {
            SubjectKind::Owner => subject_id == self.owner.id,
            SubjectKind::Dependent => self
                .dependents
                .iter()
                .any(|dependent| dependent.id == subject_id),
        }
    }

    fn remove_readings_of(&mut self, dependent_id: &str) -> Result<usize, RecordError> {
        let remaining: Vec<Reading> = self
            .readings
            .iter()
            .filter(|reading| !is_reading_of_dependent(reading, dependent_id))
            .cloned()
            .collect();
        let removed = self.readings.len() - remaining.len();

        self.persist_readings(&remaining)?;
        self.readings = remaining;
        Ok(removed)
    }

    fn persist_readings(&self, readings: &[Reading]) -> Result<(), RecordError> {
        let stored: Vec<_> = readings.iter().map(convert_to_data_reading).collect();
        self.reading_repo.save(&self.owner.id, &stored)?;
        Ok(())
    }

    fn persist_dependents(&self, dependents: &[Dependent]) -> Result<(), RecordError> {
        let stored: Vec<_> = dependents.iter().map(convert_to_data_dependent).collect();
        self.dependent_repo.save(&self.owner.id, &stored)?;
        Ok(())
    }
}

fn is_reading_of_dependent(reading: &Reading, dependent_id: &str) -> bool {
    reading.subject_kind == SubjectKind::Dependent && reading.subject_id == dependent_id
}
