//! Simulation configuration.
//!
//! Everything a run depends on besides the jobs themselves: which policy,
//! its parameters, and whether dispatched jobs keep the CPU for their
//! policy's time slice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dispatching::policies::{
    Fcfs, PriorityAging, RoundRobin, Sjf, DEFAULT_AGING_INCREMENT, DEFAULT_AGING_THRESHOLD,
    DEFAULT_QUANTUM,
};
use crate::dispatching::{DispatchPolicy, PolicyKind};
use crate::error::ConfigError;
use crate::models::Ticks;

/// How long a selected job runs before the policy is consulted again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Every selection runs exactly one unit, then the job is re-admitted.
    ///
    /// All policies become preemptive at one-unit granularity, FCFS and
    /// RR produce the same timeline, and the RR quantum has no effect.
    #[default]
    UnitStep,
    /// A selected job keeps the CPU for its policy's
    /// [`TimeSlice`](crate::dispatching::TimeSlice): FCFS and SJF run to
    /// completion, RR runs `quantum` units, PRIORITY one unit.
    HonorSlices,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::UnitStep => f.write_str("unit-step"),
            ExecutionMode::HonorSlices => f.write_str("honor-slices"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit-step" | "unit" | "literal" => Ok(ExecutionMode::UnitStep),
            "honor-slices" | "slices" | "honored" => Ok(ExecutionMode::HonorSlices),
            other => Err(ConfigError::UnknownExecutionMode(other.to_string())),
        }
    }
}

/// Configuration for one simulation run.
///
/// Missing fields deserialize to the defaults (FCFS, quantum 2, aging
/// threshold 5, aging increment 1, unit-step execution).
///
/// # Example
/// ```
/// use u_cpu_sched::dispatching::PolicyKind;
/// use u_cpu_sched::simulator::{ExecutionMode, SimulationConfig};
///
/// let config = SimulationConfig::new(PolicyKind::RoundRobin)
///     .with_quantum(4)
///     .with_execution(ExecutionMode::HonorSlices);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.build_policy().name(), "RR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Policy to run.
    pub policy: PolicyKind,
    /// Round-robin quantum (ticks).
    pub time_quantum: Ticks,
    /// Ticks since arrival after which a waiting job starts aging.
    pub aging_threshold: Ticks,
    /// Priority improvement per aging step.
    pub aging_increment: u32,
    /// Execution granularity.
    pub execution: ExecutionMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            time_quantum: DEFAULT_QUANTUM,
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            aging_increment: DEFAULT_AGING_INCREMENT,
            execution: ExecutionMode::default(),
        }
    }
}

/// Field-wise overrides layered on top of a base configuration.
///
/// `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub policy: Option<PolicyKind>,
    pub time_quantum: Option<Ticks>,
    pub aging_threshold: Option<Ticks>,
    pub aging_increment: Option<u32>,
    pub execution: Option<ExecutionMode>,
}

impl SimulationConfig {
    /// Default parameters for the given policy.
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_quantum(mut self, time_quantum: Ticks) -> Self {
        self.time_quantum = time_quantum;
        self
    }

    pub fn with_aging(mut self, threshold: Ticks, increment: u32) -> Self {
        self.aging_threshold = threshold;
        self.aging_increment = increment;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Replaces every field that `overrides` sets. Does not validate.
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
        if let Some(quantum) = overrides.time_quantum {
            self.time_quantum = quantum;
        }
        if let Some(threshold) = overrides.aging_threshold {
            self.aging_threshold = threshold;
        }
        if let Some(increment) = overrides.aging_increment {
            self.aging_increment = increment;
        }
        if let Some(execution) = overrides.execution {
            self.execution = execution;
        }
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if self.aging_increment == 0 {
            return Err(ConfigError::ZeroAgingIncrement);
        }
        Ok(())
    }

    /// Instantiates the configured policy with an empty ready-set.
    pub fn build_policy(&self) -> Box<dyn DispatchPolicy> {
        match self.policy {
            PolicyKind::Fcfs => Box::new(Fcfs::new()),
            PolicyKind::Sjf => Box::new(Sjf::new()),
            PolicyKind::RoundRobin => Box::new(RoundRobin::new(self.time_quantum)),
            PolicyKind::PriorityAging => Box::new(PriorityAging::new(
                self.aging_threshold,
                self.aging_increment,
            )),
        }
    }
}
