//! Job list persistence.
//!
//! # CSV format
//!
//! ```text
//! id,arrival,burst,priority
//! 1,0,4,2
//! 2,1,2
//! editor,3,5,1
//! ```
//!
//! The first line is a header and is skipped. A row starts either with a
//! numeric job ID or with a name; named rows get IDs 1, 2, … in file
//! order. The priority column is optional and defaults to 0. Blank lines
//! are ignored. Parsing stops at the first malformed row.
//!
//! Saving always writes the numeric form, so names are not persisted.
//!
//! # JSON format
//!
//! An array of [`JobRecord`] objects. The whole list is validated before
//! any job is built.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, PersistenceError};
use crate::models::{Job, JobId, JobRecord, Ticks};
use crate::validation::validate_records;

/// Header written by [`write_jobs`].
pub const CSV_HEADER: &str = "id,arrival,burst,priority";

/// Parses a CSV job list.
///
/// # Errors
/// [`PersistenceError::Parse`] for a malformed row and
/// [`PersistenceError::InvalidJob`] for a row describing an invalid job,
/// both with the 1-based line number.
pub fn parse_jobs<R: BufRead>(reader: R) -> Result<Vec<Job>, PersistenceError> {
    let mut jobs = Vec::new();
    let mut next_named_id: JobId = 1;

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_row(&line, line_no, &mut next_named_id)?;
        let job = Job::try_from(record).map_err(|source| PersistenceError::InvalidJob {
            line: line_no,
            source,
        })?;
        jobs.push(job);
    }

    Ok(jobs)
}

fn parse_row(
    line: &str,
    line_no: usize,
    next_named_id: &mut JobId,
) -> Result<JobRecord, PersistenceError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(PersistenceError::Parse {
            line: line_no,
            message: format!("expected 3 or 4 fields, found {}", fields.len()),
        });
    }

    let arrival_time: Ticks = parse_field(fields[1], "arrival", line_no)?;
    let burst_time: Ticks = parse_field(fields[2], "burst", line_no)?;
    let priority: u32 = match fields.get(3) {
        Some(field) => parse_field(field, "priority", line_no)?,
        None => 0,
    };

    let (id, name) = match fields[0].parse::<JobId>() {
        Ok(id) => (id, None),
        Err(_) if !fields[0].is_empty() => {
            let id = *next_named_id;
            *next_named_id += 1;
            (id, Some(fields[0].to_string()))
        }
        Err(_) => {
            return Err(PersistenceError::Parse {
                line: line_no,
                message: "missing job id or name".to_string(),
            })
        }
    };

    Ok(JobRecord {
        id,
        name,
        arrival_time,
        burst_time,
        priority,
    })
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    column: &str,
    line_no: usize,
) -> Result<T, PersistenceError> {
    field.parse().map_err(|_| PersistenceError::Parse {
        line: line_no,
        message: format!("invalid {column} '{field}'"),
    })
}

/// Writes jobs as CSV, header first.
pub fn write_jobs<W: Write>(mut writer: W, jobs: &[Job]) -> Result<(), PersistenceError> {
    writeln!(writer, "{CSV_HEADER}")?;
    for job in jobs {
        writeln!(
            writer,
            "{},{},{},{}",
            job.id(),
            job.arrival_time(),
            job.burst_time(),
            job.priority()
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a CSV job list from `path`.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>, PersistenceError> {
    let path = path.as_ref();
    let jobs = parse_jobs(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = jobs.len(), "loaded jobs");
    Ok(jobs)
}

/// Writes `jobs` as CSV to `path`, replacing any existing file.
pub fn save_jobs(path: impl AsRef<Path>, jobs: &[Job]) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    write_jobs(BufWriter::new(File::create(path)?), jobs)?;
    debug!(path = %path.display(), count = jobs.len(), "saved jobs");
    Ok(())
}

/// Parses a JSON array of job records.
///
/// # Errors
/// [`Error::Persistence`] if the document is not a record array, and
/// [`Error::Validation`] listing every invalid record otherwise.
pub fn parse_json_jobs<R: Read>(reader: R) -> crate::Result<Vec<Job>> {
    let records: Vec<JobRecord> =
        serde_json::from_reader(reader).map_err(|e| PersistenceError::Parse {
            line: e.line(),
            message: e.to_string(),
        })?;
    validate_records(&records)?;

    records
        .into_iter()
        .map(|record| Job::try_from(record).map_err(Error::from))
        .collect()
}

/// Reads a job list from `path`: JSON for a `.json` extension, CSV otherwise.
pub fn load_jobs_auto(path: impl AsRef<Path>) -> crate::Result<Vec<Job>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let file = File::open(path).map_err(PersistenceError::from)?;
        let jobs = parse_json_jobs(BufReader::new(file))?;
        debug!(path = %path.display(), count = jobs.len(), "loaded jobs");
        Ok(jobs)
    } else {
        Ok(load_jobs(path)?)
    }
}
