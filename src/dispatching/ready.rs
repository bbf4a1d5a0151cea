//! Ordered ready-set shared by the built-in policies.

use std::collections::VecDeque;

use crate::models::Job;

/// Admitted, unfinished jobs in ready-set order.
///
/// Insertion appends at the back. Every ordering operation is stable, so
/// jobs that compare equal keep their relative order; "ties broken by
/// ready-set order" falls out of that.
#[derive(Debug, Clone, Default)]
pub struct ReadySet {
    jobs: VecDeque<Job>,
}

impl ReadySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    pub fn pop_front(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Removes the first job with the smallest key.
    pub fn take_min_by_key<K, F>(&mut self, mut key: F) -> Option<Job>
    where
        K: Ord,
        F: FnMut(&Job) -> K,
    {
        let index = self
            .jobs
            .iter()
            .enumerate()
            .min_by_key(|&(_, job)| key(job))
            .map(|(i, _)| i)?;
        self.jobs.remove(index)
    }

    /// Stable sort by key.
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&Job) -> K,
    {
        self.jobs.make_contiguous().sort_by_key(key);
    }

    /// Replaces the contents with `jobs`, in the given order.
    pub fn load(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs.into();
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.jobs.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
