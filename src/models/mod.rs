//! Scheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Job` | Unit of work plus its mutable scheduling state |
//! | `JobRecord` | Static job description (input files, JSON) |
//! | `JobMetrics` | Turnaround / waiting / response, fixed at completion |
//! | `Timeline` | Append-only per-tick execution log |
//! | `GanttSpan` | Consecutive ticks of one job, for display |

mod job;
mod timeline;

pub use job::{Job, JobId, JobMetrics, JobRecord, Ticks};
pub use timeline::{GanttSpan, Timeline, TimelineEntry};
