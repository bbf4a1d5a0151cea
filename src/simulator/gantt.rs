//! Text rendering of run results.
//!
//! Presentation only: nothing here feeds back into the engine.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::models::{GanttSpan, Job, JobId, Ticks, Timeline};

const IDLE_LABEL: &str = "idle";
const MIN_CELL_WIDTH: usize = 4;

/// Gantt chart over a timeline, with optional job labels.
///
/// ```text
/// | J1 | J2 | idle | J1 |
/// 0    2    3      4    6
/// ```
#[derive(Debug, Clone)]
pub struct GanttChart<'a> {
    spans: Vec<GanttSpan>,
    labels: HashMap<JobId, &'a str>,
}

struct Segment {
    label: String,
    start: Ticks,
    end: Ticks,
}

impl<'a> GanttChart<'a> {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            spans: timeline.spans(),
            labels: HashMap::new(),
        }
    }

    /// Labels spans with job names instead of `J<id>`.
    pub fn with_labels(mut self, jobs: &'a [Job]) -> Self {
        for job in jobs {
            self.labels.insert(job.id(), job.name());
        }
        self
    }

    pub fn spans(&self) -> &[GanttSpan] {
        &self.spans
    }

    fn label(&self, job_id: JobId) -> String {
        match self.labels.get(&job_id) {
            Some(name) => (*name).to_string(),
            None => format!("J{job_id}"),
        }
    }

    /// Spans plus explicit idle segments, from t=0 to the last span.
    fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.spans.len());
        let mut cursor: Ticks = 0;
        for span in &self.spans {
            if span.start > cursor {
                segments.push(Segment {
                    label: IDLE_LABEL.to_string(),
                    start: cursor,
                    end: span.start,
                });
            }
            segments.push(Segment {
                label: self.label(span.job_id),
                start: span.start,
                end: span.end,
            });
            cursor = span.end;
        }
        segments
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments();
        let Some(last) = segments.last() else {
            return f.write_str("(empty timeline)");
        };

        let mut bar = String::new();
        let mut axis = String::new();
        for segment in &segments {
            let width = (segment.label.len() + 2).max(MIN_CELL_WIDTH);
            let _ = write!(bar, "|{:^width$}", segment.label);
            let _ = write!(axis, "{:<w$}", segment.start, w = width + 1);
        }
        bar.push('|');
        let _ = write!(axis, "{}", last.end);

        writeln!(f, "{bar}")?;
        write!(f, "{axis}")
    }
}

/// Per-job statistics table, one row per finished job.
pub fn render_job_table(jobs: &[Job]) -> String {
    let name_width = jobs
        .iter()
        .map(|j| j.name().len())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>4}  {:>7}  {:>5}  {:>8}  {:>5}  {:>10}  {:>7}  {:>10}",
        "Name", "ID", "Arrival", "Burst", "Priority", "Start", "Completion", "Waiting", "Turnaround"
    );
    for job in jobs {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>4}  {:>7}  {:>5}  {:>8}  {:>5}  {:>10}  {:>7}  {:>10}",
            job.name(),
            job.id(),
            job.arrival_time(),
            job.burst_time(),
            job.priority(),
            dash_if_none(job.start_time()),
            dash_if_none(job.completion_time()),
            dash_if_none(job.waiting_time()),
            dash_if_none(job.turnaround_time()),
        );
    }
    out
}

/// Raw timeline replay, one line per executed tick.
pub fn render_timeline_log(timeline: &Timeline) -> String {
    let mut out = String::new();
    for entry in timeline.entries() {
        let _ = writeln!(out, "JobID: {} at Time: {}", entry.job_id, entry.time);
    }
    out
}

fn dash_if_none(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
