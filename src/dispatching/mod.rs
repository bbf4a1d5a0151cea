//! Dispatch policies.
//!
//! A dispatch policy owns the ready-set (admitted, unfinished jobs) and
//! decides which job gets the CPU next. The simulator drives every policy
//! through the same [`DispatchPolicy`] contract; the variants differ only
//! in their selection rule and in how long a dispatched job may keep the
//! CPU ([`TimeSlice`]).
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::dispatching::{DispatchPolicy, policies};
//! use u_cpu_sched::models::Job;
//!
//! let mut sjf = policies::Sjf::new();
//! sjf.admit(Job::new(1, 0, 5).unwrap());
//! sjf.admit(Job::new(2, 0, 2).unwrap());
//!
//! let next = sjf.select_next(0).unwrap();
//! assert_eq!(next.id(), 2);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod policies;
mod ready;

pub use ready::ReadySet;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{Job, Ticks};

/// How long a dispatched job may hold the CPU before the policy is asked
/// again. Only consulted when the simulator honors slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlice {
    /// Non-preemptive: the job runs until it finishes.
    RunToCompletion,
    /// Preempt after this many units.
    Units(Ticks),
}

impl TimeSlice {
    /// Whether a job that has run `used` units in its current dispatch may
    /// keep running.
    pub fn allows(&self, used: Ticks) -> bool {
        match self {
            TimeSlice::RunToCompletion => true,
            TimeSlice::Units(n) => used < (*n).max(1),
        }
    }
}

/// Built-in policy variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// First-Come-First-Served.
    #[default]
    Fcfs,
    /// Shortest-Job-First (shortest remaining time).
    Sjf,
    /// Round-Robin.
    RoundRobin,
    /// Priority scheduling with aging.
    PriorityAging,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::RoundRobin,
        PolicyKind::PriorityAging,
    ];

    /// Long human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "First Come First Serve (FCFS)",
            PolicyKind::Sjf => "Shortest Job First (SJF)",
            PolicyKind::RoundRobin => "Round Robin (RR)",
            PolicyKind::PriorityAging => "Priority Scheduling with Aging",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = match self {
            PolicyKind::Fcfs => "fcfs",
            PolicyKind::Sjf => "sjf",
            PolicyKind::RoundRobin => "rr",
            PolicyKind::PriorityAging => "priority",
        };
        f.write_str(short)
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(PolicyKind::Fcfs),
            "sjf" | "srt" | "srtf" => Ok(PolicyKind::Sjf),
            "rr" | "round-robin" | "roundrobin" => Ok(PolicyKind::RoundRobin),
            "priority" | "priority-aging" | "prio" => Ok(PolicyKind::PriorityAging),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A dispatch policy: a ready-set plus a selection rule.
///
/// Jobs move by value. `select_next` hands a job out of the ready-set;
/// the simulator runs it and, if it is not finished, hands it back
/// through `admit`.
pub trait DispatchPolicy: Send + Debug {
    /// Short policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    fn kind(&self) -> PolicyKind;

    /// Inserts a job into the ready-set.
    fn admit(&mut self, job: Job);

    /// Removes and returns the next job to run, or `None` when the
    /// ready-set is empty (the CPU idles).
    fn select_next(&mut self, current_time: Ticks) -> Option<Job>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// Ready jobs in ready-set order.
    fn ready(&self) -> Vec<&Job>;

    /// Clears the ready-set and bulk-loads `jobs` in the variant's
    /// canonical initial order.
    fn reset(&mut self, jobs: Vec<Job>);

    /// Re-evaluates the ready-set before a selection at `current_time`.
    fn prepare(&mut self, _current_time: Ticks) {}

    /// How long a dispatched job may keep the CPU when slices are honored.
    fn time_slice(&self) -> TimeSlice {
        TimeSlice::RunToCompletion
    }

    fn description(&self) -> &'static str {
        self.kind().label()
    }
}
