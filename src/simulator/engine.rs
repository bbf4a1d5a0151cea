//! Discrete time-stepped simulation driver.
//!
//! # Algorithm
//!
//! Each tick `t`:
//! 1. Admit every backlog job with `arrival_time <= t` (the first tick of
//!    a run bulk-loads them with `reset`).
//! 2. Let the policy re-evaluate its ready-set (`prepare`).
//! 3. Take the job that still holds the CPU, or ask the policy for one.
//!    Run it for one unit, record `(job, t)` on the timeline, advance the
//!    clock. A finished job is finalized; an unfinished one either keeps
//!    the CPU (slice left) or goes back to the policy.
//! 4. With nothing to run, the tick is idle.
//!
//! Under [`ExecutionMode::UnitStep`] the slice is always one unit, so every
//! unfinished job returns to the policy after each tick.
//!
//! # Termination
//! The backlog only shrinks and every executed tick decrements some job's
//! remaining work, so a run takes at most
//! `max(arrival) + 1 + Σ burst` ticks.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::{ExecutionMode, SimulationConfig, SimulationKpi};
use crate::dispatching::{DispatchPolicy, TimeSlice};
use crate::error::SimulationError;
use crate::models::{Job, JobId, Ticks, Timeline};

/// What happened during one call to [`Simulator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `job_id` ran during `[time, time + 1)`.
    Executed {
        job_id: JobId,
        time: Ticks,
        /// The job completed at `time + 1`.
        finished: bool,
    },
    /// No job was ready during `[time, time + 1)`.
    Idle { time: Ticks },
    /// Nothing left to simulate; the clock did not move.
    Complete,
}

/// Results of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationOutcome {
    /// Completed jobs, in completion order.
    pub finished: Vec<Job>,
    pub timeline: Timeline,
}

impl SimulationOutcome {
    pub fn kpi(&self) -> SimulationKpi {
        SimulationKpi::calculate(&self.finished, &self.timeline)
    }
}

#[derive(Debug)]
struct Dispatched {
    job: Job,
    /// Units run since this dispatch.
    used: Ticks,
}

/// Single-CPU scheduling simulator.
///
/// Owns the job backlog, one dispatch policy, and the outputs. Jobs are
/// submitted up front; [`run`](Self::run) (or repeated
/// [`step`](Self::step)) drives the clock until every job has finished.
///
/// # Example
///
/// ```
/// use u_cpu_sched::dispatching::PolicyKind;
/// use u_cpu_sched::models::Job;
/// use u_cpu_sched::simulator::{SimulationConfig, Simulator};
///
/// let mut sim = Simulator::new(SimulationConfig::new(PolicyKind::Sjf)).unwrap();
/// sim.submit(Job::new(1, 0, 4).unwrap()).unwrap();
/// sim.submit(Job::new(2, 1, 2).unwrap()).unwrap();
///
/// let kpi = sim.run();
/// assert_eq!(sim.finished()[0].id(), 2); // preempts job 1 on arrival
/// assert_eq!(sim.timeline().len(), 6);
/// assert_eq!(kpi.job_count, 2);
/// ```
#[derive(Debug)]
pub struct Simulator {
    policy: Box<dyn DispatchPolicy>,
    execution: ExecutionMode,
    /// Pristine copies of every submitted job, in submission order.
    roster: Vec<Job>,
    ids: HashSet<JobId>,
    /// Jobs not yet arrived, stable-sorted by arrival time.
    backlog: VecDeque<Job>,
    running: Option<Dispatched>,
    finished: Vec<Job>,
    timeline: Timeline,
    current_time: Ticks,
    idle_ticks: Ticks,
    started: bool,
}

impl Simulator {
    /// Creates a simulator for a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self::with_policy(config.build_policy(), config.execution))
    }

    /// Creates a simulator around an existing policy instance.
    ///
    /// The policy's ready-set is cleared.
    pub fn with_policy(mut policy: Box<dyn DispatchPolicy>, execution: ExecutionMode) -> Self {
        policy.reset(Vec::new());
        Self {
            policy,
            execution,
            roster: Vec::new(),
            ids: HashSet::new(),
            backlog: VecDeque::new(),
            running: None,
            finished: Vec::new(),
            timeline: Timeline::new(),
            current_time: 0,
            idle_ticks: 0,
            started: false,
        }
    }

    /// Adds a job to the backlog.
    ///
    /// # Errors
    /// - [`SimulationError::AlreadyStarted`] once the first tick has run.
    /// - [`SimulationError::JobNotPristine`] for a job that already ran.
    /// - [`SimulationError::DuplicateJobId`] if the id is taken.
    pub fn submit(&mut self, job: Job) -> Result<(), SimulationError> {
        self.check_submission(&job)?;
        self.enqueue(job);
        Ok(())
    }

    /// Adds several jobs; either all are accepted or none is.
    pub fn submit_all(
        &mut self,
        jobs: impl IntoIterator<Item = Job>,
    ) -> Result<(), SimulationError> {
        let jobs: Vec<Job> = jobs.into_iter().collect();
        let mut batch_ids = HashSet::new();
        for job in &jobs {
            self.check_submission(job)?;
            if !batch_ids.insert(job.id()) {
                return Err(SimulationError::DuplicateJobId(job.id()));
            }
        }
        for job in jobs {
            self.enqueue(job);
        }
        Ok(())
    }

    fn check_submission(&self, job: &Job) -> Result<(), SimulationError> {
        if self.started {
            return Err(SimulationError::AlreadyStarted);
        }
        if !job.is_pristine() {
            return Err(SimulationError::JobNotPristine(job.id()));
        }
        if self.ids.contains(&job.id()) {
            return Err(SimulationError::DuplicateJobId(job.id()));
        }
        Ok(())
    }

    fn enqueue(&mut self, job: Job) {
        self.ids.insert(job.id());
        self.roster.push(job.clone());
        let arrival = job.arrival_time();
        let index = self.backlog.partition_point(|j| j.arrival_time() <= arrival);
        self.backlog.insert(index, job);
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_complete() {
            return StepOutcome::Complete;
        }

        let now = self.current_time;
        self.admit_arrivals(now);
        self.policy.prepare(now);

        let dispatched = match self.running.take() {
            Some(running) => Some(running),
            None => self
                .policy
                .select_next(now)
                .map(|job| Dispatched { job, used: 0 }),
        };

        let Some(mut dispatched) = dispatched else {
            trace!(t = now, "idle");
            self.idle_ticks += 1;
            self.current_time += 1;
            return StepOutcome::Idle { time: now };
        };

        let job_id = dispatched.job.id();
        let finished = dispatched.job.execute_unit(now);
        dispatched.used += 1;
        self.timeline.record(job_id, now);
        self.current_time += 1;
        trace!(
            t = now,
            job = job_id,
            remaining = dispatched.job.remaining_time(),
            "executed"
        );

        if finished {
            dispatched.job.complete(self.current_time);
            debug!(
                job = job_id,
                completion = self.current_time,
                turnaround = dispatched.job.turnaround_time(),
                waiting = dispatched.job.waiting_time(),
                "job finished"
            );
            self.finished.push(dispatched.job);
        } else if self.slice().allows(dispatched.used) {
            self.running = Some(dispatched);
        } else {
            self.policy.admit(dispatched.job);
        }

        StepOutcome::Executed {
            job_id,
            time: now,
            finished,
        }
    }

    /// Runs until every submitted job has finished.
    pub fn run(&mut self) -> SimulationKpi {
        debug!(
            policy = self.policy.name(),
            execution = %self.execution,
            jobs = self.backlog.len(),
            "simulation starting"
        );
        while self.step() != StepOutcome::Complete {}

        let kpi = self.report();
        info!(
            policy = self.policy.name(),
            jobs = kpi.job_count,
            makespan = kpi.makespan,
            avg_turnaround = kpi.avg_turnaround_time,
            avg_waiting = kpi.avg_waiting_time,
            "simulation complete"
        );
        kpi
    }

    /// Runs until every job has finished or the clock reaches `limit`,
    /// whichever comes first. Unfinished jobs stay in place, so the run
    /// can be resumed with [`step`](Self::step) or [`run`](Self::run).
    pub fn run_until(&mut self, limit: Ticks) -> SimulationKpi {
        while self.current_time < limit && self.step() != StepOutcome::Complete {}
        if !self.is_complete() {
            warn!(
                t = self.current_time,
                unfinished = self.unfinished(),
                "stopped at time limit with jobs remaining"
            );
        }
        self.report()
    }

    /// Clears all outputs and reloads the backlog with pristine copies of
    /// the submitted jobs, so the same workload can be run again.
    pub fn restart(&mut self) {
        self.policy.reset(Vec::new());
        self.running = None;
        self.finished.clear();
        self.timeline.clear();
        self.current_time = 0;
        self.idle_ticks = 0;
        self.started = false;

        let mut backlog: Vec<Job> = self.roster.iter().map(Job::pristine).collect();
        backlog.sort_by_key(|job| job.arrival_time());
        self.backlog = backlog.into();
        debug!(jobs = self.backlog.len(), "simulation restarted");
    }

    fn admit_arrivals(&mut self, now: Ticks) {
        let mut arrived = Vec::new();
        while let Some(job) = self.backlog.pop_front() {
            if job.arrival_time() > now {
                self.backlog.push_front(job);
                break;
            }
            debug!(job = job.id(), t = now, "admitted");
            arrived.push(job);
        }

        if self.started {
            for job in arrived {
                self.policy.admit(job);
            }
        } else {
            self.started = true;
            self.policy.reset(arrived);
        }
    }

    fn slice(&self) -> TimeSlice {
        match self.execution {
            ExecutionMode::UnitStep => TimeSlice::Units(1),
            ExecutionMode::HonorSlices => self.policy.time_slice(),
        }
    }

    /// Whether nothing is left to run or arrive.
    pub fn is_complete(&self) -> bool {
        self.backlog.is_empty() && self.running.is_none() && self.policy.is_empty()
    }

    pub fn current_time(&self) -> Ticks {
        self.current_time
    }

    /// Ticks on which no job was ready.
    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }

    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    pub fn policy(&self) -> &dyn DispatchPolicy {
        self.policy.as_ref()
    }

    /// Completed jobs, in completion order.
    pub fn finished(&self) -> &[Job] {
        &self.finished
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Jobs currently waiting in the policy's ready-set.
    pub fn ready_jobs(&self) -> Vec<&Job> {
        self.policy.ready()
    }

    /// Jobs not yet arrived.
    pub fn pending(&self) -> usize {
        self.backlog.len()
    }

    /// Submitted jobs that have not finished yet.
    pub fn unfinished(&self) -> usize {
        self.roster.len() - self.finished.len()
    }

    /// Metrics over the jobs finished so far.
    pub fn report(&self) -> SimulationKpi {
        SimulationKpi::calculate(&self.finished, &self.timeline)
    }

    pub fn into_outcome(self) -> SimulationOutcome {
        SimulationOutcome {
            finished: self.finished,
            timeline: self.timeline,
        }
    }
}

/// Runs `jobs` to completion under `config`.
pub fn simulate(
    config: &SimulationConfig,
    jobs: impl IntoIterator<Item = Job>,
) -> Result<SimulationOutcome, SimulationError> {
    let mut sim = Simulator::new(config.clone())?;
    sim.submit_all(jobs)?;
    sim.run();
    Ok(sim.into_outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::policies::Fcfs;
    use crate::dispatching::PolicyKind;
    use crate::error::ConfigError;

    fn make_job(id: JobId, arrival: Ticks, burst: Ticks, priority: u32) -> Job {
        Job::new(id, arrival, burst).unwrap().with_priority(priority)
    }

    fn two_jobs() -> Vec<Job> {
        vec![make_job(1, 0, 4, 0), make_job(2, 1, 2, 0)]
    }

    fn run_with(config: SimulationConfig, jobs: Vec<Job>) -> SimulationOutcome {
        simulate(&config, jobs).unwrap()
    }

    fn finished_job(outcome: &SimulationOutcome, id: JobId) -> &Job {
        outcome.finished.iter().find(|j| j.id() == id).unwrap()
    }

    fn mixed_workload() -> Vec<Job> {
        vec![
            make_job(1, 0, 7, 3),
            make_job(2, 2, 4, 1),
            make_job(3, 4, 1, 4),
            make_job(4, 5, 4, 0),
            make_job(5, 15, 3, 2), // arrives after an idle gap
            make_job(6, 5, 2, 2),
        ]
    }

    fn all_configs() -> Vec<SimulationConfig> {
        let mut configs = Vec::new();
        for kind in PolicyKind::ALL {
            for mode in [ExecutionMode::UnitStep, ExecutionMode::HonorSlices] {
                configs.push(SimulationConfig::new(kind).with_execution(mode));
            }
        }
        configs
    }

    // ---------------- Scenario: (1, 0, 4) + (2, 1, 2) ----------------

    #[test]
    fn test_fcfs_unit_step_interleaves() {
        let outcome = run_with(SimulationConfig::new(PolicyKind::Fcfs), two_jobs());
        // t0: [1] → 1.  t1: [1, 2] → 1.  Then strict alternation.
        assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 2, 1, 2, 1]);

        let j2 = finished_job(&outcome, 2);
        assert_eq!(j2.start_time(), Some(2));
        assert_eq!(j2.completion_time(), Some(5));
        assert_eq!(j2.waiting_time(), Some(2));

        let j1 = finished_job(&outcome, 1);
        assert_eq!(j1.completion_time(), Some(6));
        assert_eq!(j1.turnaround_time(), Some(6));
        assert_eq!(j1.waiting_time(), Some(2));
    }

    #[test]
    fn test_sjf_preempts_on_shorter_arrival() {
        let outcome = run_with(SimulationConfig::new(PolicyKind::Sjf), two_jobs());
        assert_eq!(outcome.timeline.job_sequence(), vec![1, 2, 2, 1, 1, 1]);
        assert_eq!(outcome.finished[0].id(), 2);
        assert_eq!(outcome.finished[1].id(), 1);

        let j2 = finished_job(&outcome, 2);
        assert_eq!(j2.completion_time(), Some(3));
        assert_eq!(j2.waiting_time(), Some(0));
        assert_eq!(finished_job(&outcome, 1).waiting_time(), Some(2));
    }

    #[test]
    fn test_fcfs_honor_slices_is_non_preemptive() {
        let config =
            SimulationConfig::new(PolicyKind::Fcfs).with_execution(ExecutionMode::HonorSlices);
        let outcome = run_with(config, two_jobs());
        assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 1, 1, 2, 2]);
        assert_eq!(finished_job(&outcome, 2).waiting_time(), Some(3));
    }

    #[test]
    fn test_sjf_honor_slices_is_non_preemptive() {
        let config =
            SimulationConfig::new(PolicyKind::Sjf).with_execution(ExecutionMode::HonorSlices);
        let outcome = run_with(config, two_jobs());
        assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_rr_honor_slices_uses_quantum() {
        let config = SimulationConfig::new(PolicyKind::RoundRobin)
            .with_quantum(2)
            .with_execution(ExecutionMode::HonorSlices);
        let outcome = run_with(config, two_jobs());
        assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 2, 2, 1, 1]);
    }

    #[test]
    fn test_rr_quantum_ignored_in_unit_step() {
        for quantum in [1, 2, 5] {
            let config = SimulationConfig::new(PolicyKind::RoundRobin).with_quantum(quantum);
            let outcome = run_with(config, two_jobs());
            assert_eq!(outcome.timeline.job_sequence(), vec![1, 1, 2, 1, 2, 1]);
        }
    }

    // ---------------- Cross-policy properties ----------------

    #[test]
    fn test_fcfs_and_rr_timelines_match_in_unit_step() {
        let fcfs = run_with(SimulationConfig::new(PolicyKind::Fcfs), mixed_workload());
        let rr = run_with(
            SimulationConfig::new(PolicyKind::RoundRobin).with_quantum(3),
            mixed_workload(),
        );
        assert_eq!(fcfs.timeline, rr.timeline);
    }

    #[test]
    fn test_job_invariants_hold_for_every_policy() {
        let total_burst: Ticks = mixed_workload().iter().map(|j| j.burst_time()).sum();

        for config in all_configs() {
            let outcome = run_with(config.clone(), mixed_workload());
            assert_eq!(outcome.finished.len(), 6, "{config:?}");
            assert_eq!(outcome.timeline.len() as Ticks, total_burst, "{config:?}");

            for job in &outcome.finished {
                let start = job.start_time().unwrap();
                let completion = job.completion_time().unwrap();
                let m = job.metrics().unwrap();
                assert!(job.arrival_time() <= start, "{config:?} job {}", job.id());
                assert!(start < completion);
                assert_eq!(m.turnaround_time, completion - job.arrival_time());
                assert_eq!(m.waiting_time, m.turnaround_time - job.burst_time());
                assert_eq!(job.remaining_time(), 0);
                assert_eq!(outcome.timeline.ticks_for(job.id()) as Ticks, job.burst_time());

                // First timeline entry of the job is its start time.
                let first = outcome
                    .timeline
                    .entries()
                    .iter()
                    .find(|e| e.job_id == job.id())
                    .unwrap();
                assert_eq!(first.time, start);
            }
        }
    }

    #[test]
    fn test_sjf_never_picks_longer_job() {
        let mut sim = Simulator::new(SimulationConfig::new(PolicyKind::Sjf)).unwrap();
        sim.submit_all(mixed_workload()).unwrap();

        let mut remaining_before: std::collections::HashMap<JobId, Ticks> = mixed_workload()
            .iter()
            .map(|j| (j.id(), j.burst_time()))
            .collect();

        loop {
            match sim.step() {
                StepOutcome::Complete => break,
                StepOutcome::Idle { .. } => {}
                StepOutcome::Executed { job_id, .. } => {
                    let picked = remaining_before[&job_id];
                    for other in sim.ready_jobs() {
                        if other.id() != job_id {
                            assert!(
                                other.remaining_time() >= picked,
                                "picked job {job_id} ({picked}) over job {} ({})",
                                other.id(),
                                other.remaining_time()
                            );
                        }
                    }
                    *remaining_before.get_mut(&job_id).unwrap() -= 1;
                }
            }
        }
        assert_eq!(sim.finished().len(), 6);
    }

    #[test]
    fn test_priority_aging_rescues_starved_job() {
        // A is urgent and long; B waits until aging brings it level.
        let jobs = vec![make_job(1, 0, 10, 0), make_job(2, 0, 3, 3)];
        let config = SimulationConfig::new(PolicyKind::PriorityAging).with_aging(5, 1);
        let outcome = run_with(config, jobs);

        // B ages at t=6,7,8 (3 → 0) and wins the tie at t=8.
        assert_eq!(
            outcome.timeline.job_sequence(),
            vec![1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 2, 1, 2]
        );
        let b = finished_job(&outcome, 2);
        assert_eq!(b.start_time(), Some(8));
        assert_eq!(b.effective_priority(), 0);
        assert_eq!(b.priority(), 3);
    }

    #[test]
    fn test_priority_without_aging_pressure_runs_to_order() {
        let jobs = vec![make_job(1, 0, 10, 0), make_job(2, 0, 3, 3)];
        let config = SimulationConfig::new(PolicyKind::PriorityAging).with_aging(100, 1);
        let outcome = run_with(config, jobs);
        let mut expected = vec![1; 10];
        expected.extend([2, 2, 2]);
        assert_eq!(outcome.timeline.job_sequence(), expected);
    }

    // ---------------- Driver mechanics ----------------

    #[test]
    fn test_idle_gap_before_arrival() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        sim.submit(make_job(1, 3, 2, 0)).unwrap();

        assert_eq!(sim.step(), StepOutcome::Idle { time: 0 });
        assert_eq!(sim.step(), StepOutcome::Idle { time: 1 });
        assert_eq!(sim.step(), StepOutcome::Idle { time: 2 });
        assert_eq!(
            sim.step(),
            StepOutcome::Executed { job_id: 1, time: 3, finished: false }
        );
        assert_eq!(
            sim.step(),
            StepOutcome::Executed { job_id: 1, time: 4, finished: true }
        );
        assert_eq!(sim.step(), StepOutcome::Complete);
        assert_eq!(sim.current_time(), 5);
        assert_eq!(sim.idle_ticks(), 3);

        let job = &sim.finished()[0];
        assert_eq!(job.start_time(), Some(3));
        assert_eq!(job.waiting_time(), Some(0));
    }

    #[test]
    fn test_empty_run() {
        let mut sim = Simulator::new(SimulationConfig::new(PolicyKind::Sjf)).unwrap();
        let kpi = sim.run();
        assert!(sim.finished().is_empty());
        assert!(sim.timeline().is_empty());
        assert_eq!(sim.current_time(), 0);
        assert_eq!(kpi.job_count, 0);
        assert_eq!(kpi.avg_waiting_time, 0.0);
    }

    #[test]
    fn test_submit_rejects_duplicates() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        sim.submit(make_job(1, 0, 1, 0)).unwrap();
        assert_eq!(
            sim.submit(make_job(1, 5, 2, 0)),
            Err(SimulationError::DuplicateJobId(1))
        );
    }

    #[test]
    fn test_submit_all_is_atomic() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        let result = sim.submit_all(vec![make_job(1, 0, 1, 0), make_job(1, 0, 2, 0)]);
        assert_eq!(result, Err(SimulationError::DuplicateJobId(1)));
        assert_eq!(sim.pending(), 0);
        assert!(sim.submit(make_job(1, 0, 1, 0)).is_ok());
    }

    #[test]
    fn test_submit_after_start_rejected() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        sim.submit(make_job(1, 0, 2, 0)).unwrap();
        sim.step();
        assert_eq!(
            sim.submit(make_job(2, 5, 1, 0)),
            Err(SimulationError::AlreadyStarted)
        );
    }

    #[test]
    fn test_submit_rejects_executed_job() {
        let outcome = run_with(SimulationConfig::default(), two_jobs());
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        assert_eq!(
            sim.submit(outcome.finished[0].clone()),
            Err(SimulationError::JobNotPristine(outcome.finished[0].id()))
        );
        assert!(sim.submit(outcome.finished[0].pristine()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig::new(PolicyKind::RoundRobin).with_quantum(0);
        assert_eq!(
            Simulator::new(config).unwrap_err(),
            SimulationError::InvalidConfig(ConfigError::ZeroQuantum)
        );
    }

    #[test]
    fn test_same_arrival_keeps_submission_order() {
        let jobs = vec![make_job(7, 0, 1, 0), make_job(3, 0, 1, 0), make_job(5, 0, 1, 0)];
        let outcome = run_with(SimulationConfig::default(), jobs);
        assert_eq!(outcome.timeline.job_sequence(), vec![7, 3, 5]);
    }

    #[test]
    fn test_run_until_stops_at_limit() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        sim.submit_all(two_jobs()).unwrap();

        let kpi = sim.run_until(3);
        assert_eq!(sim.current_time(), 3);
        assert!(!sim.is_complete());
        assert_eq!(sim.unfinished(), 2);
        assert_eq!(sim.timeline().job_sequence(), vec![1, 1, 2]);
        assert_eq!(kpi.job_count, 0);

        sim.run();
        assert_eq!(sim.unfinished(), 0);
        assert_eq!(sim.timeline().job_sequence(), vec![1, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_run_until_past_completion() {
        let mut sim = Simulator::new(SimulationConfig::default()).unwrap();
        sim.submit_all(two_jobs()).unwrap();

        let kpi = sim.run_until(100);
        assert!(sim.is_complete());
        assert_eq!(sim.current_time(), 6);
        assert_eq!(sim.unfinished(), 0);
        assert_eq!(kpi.makespan, 6);
    }

    #[test]
    fn test_restart_reproduces_run() {
        let mut sim = Simulator::new(SimulationConfig::new(PolicyKind::PriorityAging)).unwrap();
        sim.submit_all(mixed_workload()).unwrap();
        let first = sim.run();
        let first_timeline = sim.timeline().clone();
        assert_eq!(sim.unfinished(), 0);

        sim.restart();
        assert_eq!(sim.current_time(), 0);
        assert!(sim.finished().is_empty());
        assert_eq!(sim.pending(), 6);
        assert_eq!(sim.unfinished(), 6);

        let second = sim.run();
        assert_eq!(first, second);
        assert_eq!(&first_timeline, sim.timeline());
    }

    #[test]
    fn test_with_policy_clears_ready_set() {
        let mut fcfs = Fcfs::new();
        fcfs.admit(make_job(42, 0, 3, 0));
        let mut sim = Simulator::with_policy(Box::new(fcfs), ExecutionMode::UnitStep);
        assert!(sim.is_complete());
        sim.run();
        assert!(sim.finished().is_empty());
    }

    #[test]
    fn test_independent_simulators() {
        let config = SimulationConfig::new(PolicyKind::Sjf);
        let jobs = mixed_workload();
        let a = simulate(&config, jobs.clone()).unwrap();
        let b = simulate(&config, jobs).unwrap();
        assert_eq!(a, b);
    }
}
