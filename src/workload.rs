//! Random workload generation.
//!
//! Produces job lists with a mix of short interactive bursts and long
//! CPU-bound ones, useful for comparing policies on the same input.
//! Output depends only on the parameters and the RNG, so a fixed seed
//! always yields the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Job, JobId, Ticks};

/// Bernoulli-arrival workload generator.
///
/// On each of `ticks` time units a job arrives with probability
/// `p_arrival`. It is short with probability `p_short`, long otherwise.
/// Priorities are drawn uniformly from `0..=max_priority`.
///
/// # Example
/// ```
/// use u_cpu_sched::workload::WorkloadGenerator;
///
/// let generator = WorkloadGenerator::default();
/// let a = generator.generate_seeded(7).unwrap();
/// let b = generator.generate_seeded(7).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadGenerator {
    /// Number of ticks during which jobs may arrive.
    pub ticks: Ticks,
    /// Per-tick arrival probability.
    pub p_arrival: f64,
    /// Probability that an arriving job is short.
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_priority: u32,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.5,
            p_short: 0.7,
            short_burst: 2,
            long_burst: 8,
            max_priority: 5,
        }
    }
}

impl WorkloadGenerator {
    /// Checks probabilities lie in `[0, 1]` and bursts are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, p) in [("p_arrival", self.p_arrival), ("p_short", self.p_short)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidWorkload(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if self.short_burst == 0 || self.long_burst == 0 {
            return Err(ConfigError::InvalidWorkload(
                "burst lengths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Generates a workload using `rng`. Job IDs start at 1 and follow
    /// arrival order.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> crate::Result<Vec<Job>> {
        self.validate()?;

        let mut jobs = Vec::new();
        let mut next_id: JobId = 1;
        for tick in 0..self.ticks {
            if !rng.random_bool(self.p_arrival) {
                continue;
            }
            let burst = if rng.random_bool(self.p_short) {
                self.short_burst
            } else {
                self.long_burst
            };
            let priority = rng.random_range(0..=self.max_priority);

            jobs.push(Job::new(next_id, tick, burst)?.with_priority(priority));
            next_id += 1;
        }
        Ok(jobs)
    }

    /// Generates a workload from a fixed seed.
    pub fn generate_seeded(&self, seed: u64) -> crate::Result<Vec<Job>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}
