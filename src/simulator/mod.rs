//! Time-stepped simulator, KPIs and result rendering.
//!
//! `Simulator` drives one [`DispatchPolicy`](crate::dispatching::DispatchPolicy)
//! over a fixed set of jobs, one tick at a time, recording a per-tick
//! timeline. `SimulationKpi` summarizes a run; `GanttChart` and the
//! `render_*` helpers turn it into text.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Law (2015), "Simulation Modeling and Analysis", Ch. 1.3 (time-advance)

mod config;
mod engine;
mod gantt;
mod kpi;

pub use config::{ConfigOverrides, ExecutionMode, SimulationConfig};
pub use engine::{simulate, SimulationOutcome, Simulator, StepOutcome};
pub use gantt::{render_job_table, render_timeline_log, GanttChart};
pub use kpi::SimulationKpi;
