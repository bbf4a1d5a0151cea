//! Built-in dispatch policies.
//!
//! | Policy | Selection | Slice (when honored) |
//! |--------|-----------|----------------------|
//! | FCFS | Earliest inserted | Run to completion |
//! | SJF | Least remaining time | Run to completion |
//! | RR | Earliest inserted | `quantum` units |
//! | PRIORITY | Lowest effective priority, aged | One unit |
//!
//! Selection is evaluated afresh on every call. Because the default
//! simulator runs one unit per selection and re-admits unfinished jobs at
//! the back, FCFS and RR both behave as one-unit round-robin there, and
//! SJF and PRIORITY are preemptive.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", §5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", §2.4.3

use tracing::trace;

use super::{DispatchPolicy, PolicyKind, ReadySet, TimeSlice};
use crate::models::{Job, Ticks};

/// Default round-robin quantum.
pub const DEFAULT_QUANTUM: Ticks = 2;
/// Default wait (ticks since arrival) after which a job starts aging.
pub const DEFAULT_AGING_THRESHOLD: Ticks = 5;
/// Default priority improvement per aging step.
pub const DEFAULT_AGING_INCREMENT: u32 = 1;

// ======================== Queue-based policies ========================

/// First-Come-First-Served.
///
/// Plain insertion-order queue. Re-admitted jobs go to the back.
#[derive(Debug, Clone, Default)]
pub struct Fcfs {
    queue: ReadySet,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fcfs
    }

    fn admit(&mut self, job: Job) {
        self.queue.push_back(job);
    }

    fn select_next(&mut self, _current_time: Ticks) -> Option<Job> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn ready(&self) -> Vec<&Job> {
        self.queue.iter().collect()
    }

    fn reset(&mut self, jobs: Vec<Job>) {
        self.queue.load(jobs);
    }
}

/// Round-Robin.
///
/// Same queue discipline as [`Fcfs`]; the quantum only takes effect when
/// the simulator honors time slices.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    queue: ReadySet,
    quantum: Ticks,
}

impl RoundRobin {
    /// Creates a round-robin policy. A zero quantum is treated as 1.
    pub fn new(quantum: Ticks) -> Self {
        Self {
            queue: ReadySet::new(),
            quantum: quantum.max(1),
        }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}

impl DispatchPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn admit(&mut self, job: Job) {
        self.queue.push_back(job);
    }

    fn select_next(&mut self, _current_time: Ticks) -> Option<Job> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn ready(&self) -> Vec<&Job> {
        self.queue.iter().collect()
    }

    fn reset(&mut self, jobs: Vec<Job>) {
        self.queue.load(jobs);
    }

    fn time_slice(&self) -> TimeSlice {
        TimeSlice::Units(self.quantum)
    }
}

// ======================== Ranked policies ========================

/// Shortest-Job-First on remaining time.
///
/// Picks the job with the least remaining work; ties go to the job
/// earlier in the ready-set.
#[derive(Debug, Clone, Default)]
pub struct Sjf {
    ready: ReadySet,
}

impl Sjf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Sjf
    }

    fn admit(&mut self, job: Job) {
        self.ready.push_back(job);
    }

    fn select_next(&mut self, _current_time: Ticks) -> Option<Job> {
        self.ready.take_min_by_key(|job| job.remaining_time())
    }

    fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    fn len(&self) -> usize {
        self.ready.len()
    }

    fn ready(&self) -> Vec<&Job> {
        self.ready.iter().collect()
    }

    fn reset(&mut self, jobs: Vec<Job>) {
        self.ready.load(jobs);
        self.ready.sort_by_key(|job| job.burst_time());
    }

    fn prepare(&mut self, _current_time: Ticks) {
        self.ready.sort_by_key(|job| job.remaining_time());
    }
}

/// Priority scheduling with aging.
///
/// Lower effective priority runs first. Before each selection, every
/// ready job that has been in the system for more than `aging_threshold`
/// ticks has its effective priority lowered by `aging_increment`
/// (clamped at 0), so long-waiting jobs eventually win.
#[derive(Debug, Clone)]
pub struct PriorityAging {
    ready: ReadySet,
    aging_threshold: Ticks,
    aging_increment: u32,
}

impl PriorityAging {
    pub fn new(aging_threshold: Ticks, aging_increment: u32) -> Self {
        Self {
            ready: ReadySet::new(),
            aging_threshold,
            aging_increment,
        }
    }

    pub fn aging_threshold(&self) -> Ticks {
        self.aging_threshold
    }

    pub fn aging_increment(&self) -> u32 {
        self.aging_increment
    }

    /// Ages every ready job that has waited past the threshold.
    pub fn apply_aging(&mut self, current_time: Ticks) {
        let threshold = self.aging_threshold;
        let increment = self.aging_increment;
        for job in self.ready.iter_mut() {
            if current_time.saturating_sub(job.arrival_time()) > threshold {
                let before = job.effective_priority();
                job.age(increment);
                if job.effective_priority() != before {
                    trace!(
                        job = job.id(),
                        from = before,
                        to = job.effective_priority(),
                        t = current_time,
                        "aged"
                    );
                }
            }
        }
    }
}

impl Default for PriorityAging {
    fn default() -> Self {
        Self::new(DEFAULT_AGING_THRESHOLD, DEFAULT_AGING_INCREMENT)
    }
}

impl DispatchPolicy for PriorityAging {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::PriorityAging
    }

    fn admit(&mut self, job: Job) {
        self.ready.push_back(job);
    }

    fn select_next(&mut self, _current_time: Ticks) -> Option<Job> {
        self.ready.take_min_by_key(|job| job.effective_priority())
    }

    fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    fn len(&self) -> usize {
        self.ready.len()
    }

    fn ready(&self) -> Vec<&Job> {
        self.ready.iter().collect()
    }

    fn reset(&mut self, jobs: Vec<Job>) {
        self.ready.load(jobs);
        self.ready.sort_by_key(|job| job.effective_priority());
    }

    fn prepare(&mut self, current_time: Ticks) {
        self.apply_aging(current_time);
        self.ready.sort_by_key(|job| job.effective_priority());
    }

    fn time_slice(&self) -> TimeSlice {
        TimeSlice::Units(1)
    }
}
