//! Error types.
//!
//! Each layer owns a small `thiserror` enum; [`Error`] aggregates them for
//! callers that drive the whole pipeline (load → validate → simulate).

use thiserror::Error;

use crate::models::JobId;
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected job construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobError {
    /// A job must require at least one unit of CPU time.
    #[error("job {0} has zero burst time")]
    ZeroBurst(JobId),

    /// Deserialized scheduling state violates the job invariants.
    #[error("job {id} has inconsistent state: {reason}")]
    InconsistentState { id: JobId, reason: &'static str },
}

/// Invalid simulation configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Round-robin quantum must be at least one unit.
    #[error("time quantum must be at least 1")]
    ZeroQuantum,

    /// Aging must make progress when it triggers.
    #[error("aging increment must be at least 1")]
    ZeroAgingIncrement,

    /// Policy name not recognised.
    #[error("unknown policy '{0}' (expected fcfs, sjf, rr or priority)")]
    UnknownPolicy(String),

    /// Execution mode name not recognised.
    #[error("unknown execution mode '{0}' (expected unit-step or honor-slices)")]
    UnknownExecutionMode(String),

    /// Workload generator parameters out of range.
    #[error("invalid workload parameters: {0}")]
    InvalidWorkload(String),
}

/// Errors raised while feeding a simulator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Two submitted jobs share an id.
    #[error("duplicate job id {0}")]
    DuplicateJobId(JobId),

    /// The job has already been executed (non-initial scheduling state).
    #[error("job {0} is not in its initial state")]
    JobNotPristine(JobId),

    /// Jobs must all be known before the first tick.
    #[error("cannot submit jobs after the simulation has started")]
    AlreadyStarted,

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// CSV load/save failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A row parsed but describes an invalid job.
    #[error("line {line}: {source}")]
    InvalidJob {
        line: usize,
        #[source]
        source: JobError,
    },
}

/// Top-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// One or more roster-level validation failures.
    #[error("{} validation error(s): {}", .0.len(), join_messages(.0))]
    Validation(Vec<ValidationError>),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
