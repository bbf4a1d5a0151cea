//! Job model.
//!
//! A job is a single CPU burst: it arrives at a fixed time, needs a fixed
//! number of time units, and carries a static priority. The simulator
//! mutates its scheduling state (remaining work, start/completion stamps)
//! and freezes it once the last unit executes.
//!
//! # Time Representation
//! All times are integer ticks relative to the start of the simulation
//! (t=0). One tick is the smallest schedulable unit.

use serde::{Deserialize, Serialize};

use crate::error::JobError;

/// Caller-assigned job identifier. Unique within one simulation run.
pub type JobId = u32;

/// Simulated time, in ticks.
pub type Ticks = u64;

/// Metrics derived once a job completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetrics {
    /// Completion − arrival.
    pub turnaround_time: Ticks,
    /// Turnaround − burst (time spent ready but not running).
    pub waiting_time: Ticks,
    /// First start − arrival.
    pub response_time: Ticks,
}

/// A job to be scheduled, together with its scheduling state.
///
/// Static attributes (`id`, `name`, `arrival_time`, `burst_time`,
/// `priority`) are fixed at construction. Scheduling state is only
/// advanced by the simulator, so the fields are private and exposed
/// through accessors.
///
/// Serializes with its full scheduling state. Deserialization accepts
/// either a bare record (a pristine job) or a full state, which is
/// checked for consistency; metrics are recomputed from the time stamps.
///
/// # Example
/// ```
/// use u_cpu_sched::models::Job;
///
/// let job = Job::new(1, 0, 4).unwrap().with_priority(2);
/// assert_eq!(job.name(), "Job1");
/// assert_eq!(job.remaining_time(), 4);
/// assert!(job.start_time().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JobState")]
pub struct Job {
    id: JobId,
    name: String,
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: u32,
    effective_priority: u32,
    remaining_time: Ticks,
    start_time: Option<Ticks>,
    completion_time: Option<Ticks>,
    metrics: Option<JobMetrics>,
}

/// Static description of a job, as read from input files or JSON.
///
/// Converting a record into a [`Job`] enforces the same checks as
/// [`Job::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default)]
    pub name: Option<String>,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default)]
    pub priority: u32,
}

/// Serialized form of a [`Job`]; scheduling fields are optional.
#[derive(Deserialize)]
struct JobState {
    id: JobId,
    #[serde(default)]
    name: Option<String>,
    arrival_time: Ticks,
    burst_time: Ticks,
    #[serde(default)]
    priority: u32,
    #[serde(default)]
    effective_priority: Option<u32>,
    #[serde(default)]
    remaining_time: Option<Ticks>,
    #[serde(default)]
    start_time: Option<Ticks>,
    #[serde(default)]
    completion_time: Option<Ticks>,
}

impl Job {
    /// Creates a job arriving at `arrival_time` that needs `burst_time` units.
    ///
    /// The name defaults to `"Job<id>"` and the priority to 0.
    ///
    /// # Errors
    /// [`JobError::ZeroBurst`] if `burst_time` is zero: such a job could
    /// never be selected to finish.
    pub fn new(id: JobId, arrival_time: Ticks, burst_time: Ticks) -> Result<Self, JobError> {
        if burst_time == 0 {
            return Err(JobError::ZeroBurst(id));
        }
        Ok(Self {
            id,
            name: format!("Job{id}"),
            arrival_time,
            burst_time,
            priority: 0,
            effective_priority: 0,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            metrics: None,
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority (lower value = more urgent).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self.effective_priority = priority;
        self
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    /// Priority as submitted.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Priority after aging. Equal to [`priority`](Self::priority) until a
    /// policy ages the job.
    pub fn effective_priority(&self) -> u32 {
        self.effective_priority
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Tick of first execution, once dispatched.
    pub fn start_time(&self) -> Option<Ticks> {
        self.start_time
    }

    /// Tick at which the last unit finished.
    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion_time
    }

    /// Metrics, available once the job has completed.
    pub fn metrics(&self) -> Option<JobMetrics> {
        self.metrics
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.metrics.map(|m| m.turnaround_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.metrics.map(|m| m.waiting_time)
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.metrics.map(|m| m.response_time)
    }

    /// Units already executed.
    pub fn executed_time(&self) -> Ticks {
        self.burst_time - self.remaining_time
    }

    /// Whether all work has been executed.
    pub fn is_finished(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether the job is still in its freshly-constructed state.
    pub fn is_pristine(&self) -> bool {
        self.remaining_time == self.burst_time
            && self.start_time.is_none()
            && self.completion_time.is_none()
            && self.effective_priority == self.priority
    }

    /// Static description of this job.
    pub fn record(&self) -> JobRecord {
        JobRecord {
            id: self.id,
            name: Some(self.name.clone()),
            arrival_time: self.arrival_time,
            burst_time: self.burst_time,
            priority: self.priority,
        }
    }

    /// A pristine copy of this job (scheduling state cleared).
    pub fn pristine(&self) -> Self {
        Self {
            effective_priority: self.priority,
            remaining_time: self.burst_time,
            start_time: None,
            completion_time: None,
            metrics: None,
            ..self.clone()
        }
    }

    /// Lowers the effective priority by `increment`, clamped at 0.
    pub(crate) fn age(&mut self, increment: u32) {
        self.effective_priority = self.effective_priority.saturating_sub(increment);
    }

    /// Runs the job for the unit starting at `now`.
    ///
    /// Stamps `start_time` on first execution. Returns `true` when this
    /// was the last unit.
    pub(crate) fn execute_unit(&mut self, now: Ticks) -> bool {
        debug_assert!(self.remaining_time > 0, "job {} has no work left", self.id);
        debug_assert!(now >= self.arrival_time, "job {} ran before arrival", self.id);
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.remaining_time == 0
    }

    /// Records completion at `now` and computes metrics.
    ///
    /// No-op for a job that is already finished or still has work left.
    pub(crate) fn complete(&mut self, now: Ticks) {
        if self.is_finished() || self.remaining_time > 0 {
            return;
        }
        let start = self.start_time.unwrap_or(now);
        let turnaround_time = now - self.arrival_time;
        self.completion_time = Some(now);
        self.metrics = Some(JobMetrics {
            turnaround_time,
            waiting_time: turnaround_time - self.burst_time,
            response_time: start - self.arrival_time,
        });
    }
}

impl TryFrom<JobRecord> for Job {
    type Error = JobError;

    fn try_from(record: JobRecord) -> Result<Self, Self::Error> {
        let job = Job::new(record.id, record.arrival_time, record.burst_time)?
            .with_priority(record.priority);
        Ok(match record.name {
            Some(name) => job.with_name(name),
            None => job,
        })
    }
}

impl TryFrom<JobState> for Job {
    type Error = JobError;

    fn try_from(state: JobState) -> Result<Self, Self::Error> {
        let id = state.id;
        let inconsistent = |reason: &'static str| JobError::InconsistentState { id, reason };

        let mut job = Job::try_from(JobRecord {
            id,
            name: state.name,
            arrival_time: state.arrival_time,
            burst_time: state.burst_time,
            priority: state.priority,
        })?;

        if let Some(effective) = state.effective_priority {
            if effective > job.priority {
                return Err(inconsistent("effective priority above static priority"));
            }
            job.effective_priority = effective;
        }

        let remaining = state.remaining_time.unwrap_or(job.burst_time);
        if remaining > job.burst_time {
            return Err(inconsistent("remaining time exceeds burst time"));
        }
        job.remaining_time = remaining;

        match state.start_time {
            Some(start) if start < job.arrival_time => {
                return Err(inconsistent("started before arrival"))
            }
            Some(start) => job.start_time = Some(start),
            None if remaining < job.burst_time => {
                return Err(inconsistent("executed job has no start time"))
            }
            None => {}
        }

        match (state.completion_time, job.start_time) {
            (Some(_), _) if remaining > 0 => {
                return Err(inconsistent("completed job has work left"))
            }
            (Some(completion), Some(start)) => {
                if completion <= start || completion - job.arrival_time < job.burst_time {
                    return Err(inconsistent("completion time too early"));
                }
                job.complete(completion);
            }
            (Some(_), None) => return Err(inconsistent("completed job has no start time")),
            (None, _) if remaining == 0 => {
                return Err(inconsistent("finished job has no completion time"))
            }
            (None, _) => {}
        }

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(3, 5, 10)
            .unwrap()
            .with_name("compile")
            .with_priority(4);

        assert_eq!(job.id(), 3);
        assert_eq!(job.name(), "compile");
        assert_eq!(job.arrival_time(), 5);
        assert_eq!(job.burst_time(), 10);
        assert_eq!(job.priority(), 4);
        assert_eq!(job.effective_priority(), 4);
        assert_eq!(job.remaining_time(), 10);
        assert!(job.is_pristine());
        assert!(job.metrics().is_none());
    }

    #[test]
    fn test_zero_burst_rejected() {
        assert_eq!(Job::new(1, 0, 0), Err(JobError::ZeroBurst(1)));
    }

    #[test]
    fn test_start_time_set_once() {
        let mut job = Job::new(1, 2, 3).unwrap();
        assert!(!job.execute_unit(2));
        assert!(!job.execute_unit(5));
        assert_eq!(job.start_time(), Some(2));
        assert_eq!(job.remaining_time(), 1);
        assert_eq!(job.executed_time(), 2);
        assert!(!job.is_pristine());
    }

    #[test]
    fn test_completion_metrics() {
        // Arrives at 1, runs at 3, 4 and 6 → completes at 7.
        let mut job = Job::new(1, 1, 3).unwrap();
        job.execute_unit(3);
        job.execute_unit(4);
        assert!(job.execute_unit(6));
        job.complete(7);

        let m = job.metrics().unwrap();
        assert_eq!(job.completion_time(), Some(7));
        assert_eq!(m.turnaround_time, 6);
        assert_eq!(m.waiting_time, 3);
        assert_eq!(m.response_time, 2);
    }

    #[test]
    fn test_complete_ignored_with_work_left() {
        let mut job = Job::new(1, 0, 2).unwrap();
        job.execute_unit(0);
        job.complete(1);
        assert!(!job.is_finished());
        assert!(job.metrics().is_none());
    }

    #[test]
    fn test_aging_clamps_at_zero() {
        let mut job = Job::new(1, 0, 1).unwrap().with_priority(3);
        job.age(2);
        assert_eq!(job.effective_priority(), 1);
        job.age(2);
        assert_eq!(job.effective_priority(), 0);
        assert_eq!(job.priority(), 3);
    }

    #[test]
    fn test_pristine_copy() {
        let mut job = Job::new(9, 0, 2).unwrap().with_priority(5);
        job.age(1);
        job.execute_unit(0);
        let fresh = job.pristine();
        assert!(fresh.is_pristine());
        assert_eq!(fresh.effective_priority(), 5);
        assert_eq!(fresh.remaining_time(), 2);
    }

    #[test]
    fn test_deserialize_validates() {
        let job: Job =
            serde_json::from_str(r#"{"id":4,"arrival_time":1,"burst_time":2,"priority":7}"#)
                .unwrap();
        assert_eq!(job.name(), "Job4");
        assert_eq!(job.effective_priority(), 7);
        assert!(job.is_pristine());

        let bad = serde_json::from_str::<Job>(r#"{"id":4,"arrival_time":1,"burst_time":0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serde_keeps_scheduling_state() {
        let mut finished = Job::new(2, 1, 3).unwrap().with_priority(4);
        finished.age(1);
        finished.execute_unit(2);
        finished.execute_unit(4);
        finished.execute_unit(5);
        finished.complete(6);

        let json = serde_json::to_string(&finished).unwrap();
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, finished);
        assert_eq!(back.waiting_time(), Some(2));

        let mut running = Job::new(3, 0, 4).unwrap();
        running.execute_unit(1);
        let back: Job = serde_json::from_str(&serde_json::to_string(&running).unwrap()).unwrap();
        assert_eq!(back, running);
        assert!(!back.is_pristine());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_state() {
        let cases = [
            r#"{"id":1,"arrival_time":0,"burst_time":2,"remaining_time":3}"#,
            r#"{"id":1,"arrival_time":0,"burst_time":2,"remaining_time":1}"#,
            r#"{"id":1,"arrival_time":2,"burst_time":2,"remaining_time":1,"start_time":1}"#,
            r#"{"id":1,"arrival_time":0,"burst_time":2,"remaining_time":1,"start_time":0,"completion_time":2}"#,
            r#"{"id":1,"arrival_time":0,"burst_time":2,"remaining_time":0,"start_time":0}"#,
            r#"{"id":1,"arrival_time":0,"burst_time":2,"remaining_time":0,"start_time":0,"completion_time":1}"#,
            r#"{"id":1,"arrival_time":0,"burst_time":2,"priority":1,"effective_priority":3}"#,
        ];
        for json in cases {
            assert!(serde_json::from_str::<Job>(json).is_err(), "accepted {json}");
        }

        let err = Job::try_from(JobState {
            id: 5,
            name: None,
            arrival_time: 0,
            burst_time: 1,
            priority: 0,
            effective_priority: None,
            remaining_time: Some(0),
            start_time: Some(0),
            completion_time: None,
        })
        .unwrap_err();
        assert_eq!(
            err,
            JobError::InconsistentState {
                id: 5,
                reason: "finished job has no completion time"
            }
        );
    }
}
