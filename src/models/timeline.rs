//! Execution timeline (Gantt record).
//!
//! One entry per executed tick, in execution order. Idle ticks leave no
//! entry. The simulator is the only writer; consumers read it after the
//! run.

use serde::{Deserialize, Serialize};

use super::{JobId, Ticks};

/// A single executed tick: `job_id` held the CPU during `[time, time + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub job_id: JobId,
    pub time: Ticks,
}

/// Consecutive ticks of one job, grouped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSpan {
    pub job_id: JobId,
    /// First tick (inclusive).
    pub start: Ticks,
    /// End tick (exclusive).
    pub end: Ticks,
}

impl GanttSpan {
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Append-only execution log.
///
/// Deserialization rejects entries whose times are not strictly
/// increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeline")]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

#[derive(Deserialize)]
struct RawTimeline {
    entries: Vec<TimelineEntry>,
}

impl TryFrom<RawTimeline> for Timeline {
    type Error = String;

    fn try_from(raw: RawTimeline) -> Result<Self, Self::Error> {
        if let Some(w) = raw.entries.windows(2).find(|w| w[0].time >= w[1].time) {
            return Err(format!(
                "timeline entries out of order: t={} followed by t={}",
                w[0].time, w[1].time
            ));
        }
        Ok(Self {
            entries: raw.entries,
        })
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, job_id: JobId, time: Ticks) {
        debug_assert!(
            self.entries.last().map_or(true, |e| e.time < time),
            "timeline must be recorded in increasing time order"
        );
        self.entries.push(TimelineEntry { job_id, time });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, in execution order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Job ids in execution order (one per executed tick).
    pub fn job_sequence(&self) -> Vec<JobId> {
        self.entries.iter().map(|e| e.job_id).collect()
    }

    /// Number of ticks executed by `job_id`.
    pub fn ticks_for(&self, job_id: JobId) -> usize {
        self.entries.iter().filter(|e| e.job_id == job_id).count()
    }

    /// Number of times the CPU switched from one job to another.
    pub fn context_switches(&self) -> usize {
        self.entries
            .windows(2)
            .filter(|w| w[0].job_id != w[1].job_id)
            .count()
    }

    /// Groups consecutive, time-contiguous entries of the same job.
    ///
    /// Purely presentational: the entries themselves are unchanged.
    pub fn spans(&self) -> Vec<GanttSpan> {
        let mut spans: Vec<GanttSpan> = Vec::new();
        for entry in &self.entries {
            match spans.last_mut() {
                Some(span) if span.job_id == entry.job_id && span.end == entry.time => {
                    span.end += 1;
                }
                _ => spans.push(GanttSpan {
                    job_id: entry.job_id,
                    start: entry.time,
                    end: entry.time + 1,
                }),
            }
        }
        spans
    }
}

#[cfg(test)]
impl FromIterator<(JobId, Ticks)> for Timeline {
    fn from_iter<I: IntoIterator<Item = (JobId, Ticks)>>(iter: I) -> Self {
        let mut timeline = Timeline::new();
        for (job_id, time) in iter {
            timeline.record(job_id, time);
        }
        timeline
    }
}
