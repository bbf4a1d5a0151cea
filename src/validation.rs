//! Input validation for job rosters.
//!
//! Checks a job list before it is handed to a simulator and reports every
//! problem at once instead of stopping at the first. Detects:
//! - Duplicate job IDs
//! - Zero burst times (records only; [`Job`] cannot hold one)
//! - Jobs that already carry scheduling state
//! - Empty names

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Job, JobRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job requires no CPU time.
    ZeroBurst,
    /// A job has already been (partially) executed.
    NotPristine,
    /// A job has an empty display name.
    EmptyName,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates jobs about to be submitted to a simulator.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Every job is in its initial scheduling state
/// 3. Every job has a non-empty name
///
/// An empty list is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id()),
            ));
        }

        if !job.is_pristine() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotPristine,
                format!("Job {} has already been scheduled", job.id()),
            ));
        }

        if job.name().trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Job {} has an empty name", job.id()),
            ));
        }
    }

    finish(errors)
}

/// Validates raw job records (e.g., parsed from a file) before
/// converting them into jobs.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Every burst time is at least 1
/// 3. Names, when given, are non-empty
pub fn validate_records(records: &[JobRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for record in records {
        if !ids.insert(record.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", record.id),
            ));
        }

        if record.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Job {} has zero burst time", record.id),
            ));
        }

        if record.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Job {} has an empty name", record.id),
            ));
        }
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
