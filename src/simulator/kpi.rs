//! Simulation quality metrics (KPIs).
//!
//! Computed from the finished jobs and the timeline of a run. Pure: the
//! same inputs always give the same numbers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | Mean of completion − arrival |
//! | Avg Waiting | Mean of turnaround − burst |
//! | Avg Response | Mean of first start − arrival |
//! | Makespan | Latest completion time |
//! | CPU Utilization | Busy ticks / makespan |
//! | Throughput | Finished jobs / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use serde::Serialize;
use std::fmt;

use crate::models::{Job, Ticks, Timeline};

/// Aggregate performance indicators of one run.
///
/// Averages are 0.0 when no job finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationKpi {
    pub job_count: usize,
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
    pub avg_response_time: f64,
    pub max_waiting_time: Ticks,
    /// Latest completion time.
    pub makespan: Ticks,
    /// Ticks on which some job was running.
    pub busy_ticks: Ticks,
    /// Busy ticks / makespan (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Finished jobs per tick.
    pub throughput: f64,
    /// Switches between different jobs on the timeline.
    pub context_switches: usize,
}

impl SimulationKpi {
    /// Computes KPIs over `finished` jobs and the run's `timeline`.
    ///
    /// Jobs without metrics (not finished) are skipped.
    pub fn calculate(finished: &[Job], timeline: &Timeline) -> Self {
        let mut total_turnaround: f64 = 0.0;
        let mut total_waiting: f64 = 0.0;
        let mut total_response: f64 = 0.0;
        let mut max_waiting: Ticks = 0;
        let mut makespan: Ticks = 0;
        let mut counted: usize = 0;

        for job in finished {
            let (Some(metrics), Some(completion)) = (job.metrics(), job.completion_time()) else {
                continue;
            };
            counted += 1;
            total_turnaround += metrics.turnaround_time as f64;
            total_waiting += metrics.waiting_time as f64;
            total_response += metrics.response_time as f64;
            max_waiting = max_waiting.max(metrics.waiting_time);
            makespan = makespan.max(completion);
        }

        let mean = |total: f64| {
            if counted == 0 {
                0.0
            } else {
                total / counted as f64
            }
        };

        let busy_ticks = timeline.len() as Ticks;
        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_ticks as f64 / makespan as f64,
                counted as f64 / makespan as f64,
            )
        };

        Self {
            job_count: counted,
            avg_turnaround_time: mean(total_turnaround),
            avg_waiting_time: mean(total_waiting),
            avg_response_time: mean(total_response),
            max_waiting_time: max_waiting,
            makespan,
            busy_ticks,
            cpu_utilization,
            throughput,
            context_switches: timeline.context_switches(),
        }
    }
}

impl fmt::Display for SimulationKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "Average Response Time: {:.2}", self.avg_response_time)?;
        writeln!(f, "Makespan: {}", self.makespan)?;
        writeln!(f, "CPU Utilization: {:.1}%", self.cpu_utilization * 100.0)?;
        writeln!(f, "Throughput: {:.3} jobs/tick", self.throughput)?;
        write!(f, "Context Switches: {}", self.context_switches)
    }
}
