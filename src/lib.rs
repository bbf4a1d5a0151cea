//! Discrete-time CPU scheduling simulator.
//!
//! Runs a set of jobs on a single simulated CPU under a pluggable dispatch
//! policy, one tick at a time, and reports per-job metrics together with
//! the per-tick execution timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobMetrics`, `Timeline`
//! - **`dispatching`**: The `DispatchPolicy` trait and the FCFS, SJF,
//!   Round-Robin and Priority-with-aging policies
//! - **`simulator`**: `Simulator`, `SimulationConfig`, KPIs and Gantt rendering
//! - **`validation`**: Roster integrity checks (duplicate IDs, zero bursts)
//! - **`persistence`**: CSV and JSON job lists
//! - **`workload`**: Seeded random workloads
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::dispatching::PolicyKind;
//! use u_cpu_sched::models::Job;
//! use u_cpu_sched::simulator::{simulate, SimulationConfig};
//!
//! let jobs = vec![Job::new(1, 0, 4).unwrap(), Job::new(2, 1, 2).unwrap()];
//! let outcome = simulate(&SimulationConfig::new(PolicyKind::RoundRobin), jobs).unwrap();
//!
//! assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 2, 1, 2, 1]);
//! assert_eq!(outcome.kpi().makespan, 6);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", §2.4

pub mod dispatching;
pub mod error;
pub mod models;
pub mod persistence;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
