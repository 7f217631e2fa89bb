//! Reading and writing the roster CSV file
//!
//! The file is opened, fully read or fully written, and closed within each
//! call. There is no locking.

use super::error::{Result, StoreError};
use super::row::{RosterRow, HEADER};
use logger::{debug, warn};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;

/// What to do with a row that cannot be interpreted while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRowPolicy {
    /// Abort the whole load
    #[default]
    Fail,
    /// Drop the row and log a warning
    Skip,
}

impl FromStr for MalformedRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            _ => Err(format!(
                "Invalid malformed-row policy: '{s}' (expected 'fail' or 'skip')"
            )),
        }
    }
}

impl fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_error(path: &Path, source: csv::Error) -> StoreError {
    StoreError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Load every row after the header.
///
/// A missing file is an empty roster, not an error.
///
/// # Errors
/// Returns [`StoreError::MalformedRow`] under [`MalformedRowPolicy::Fail`]
/// when a row has the wrong field count, a non-numeric attendance, or is not
/// valid UTF-8. I/O and CSV framing failures are always returned.
pub fn load_all(path: &Path, policy: MalformedRowPolicy) -> Result<Vec<RosterRow>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No roster file at {}; starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(io_error(path, e)),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in reader.records() {
        let (line, reason) = match result {
            Ok(record) => {
                let line = record.position().map_or(0, csv::Position::line);
                match RosterRow::from_fields(record.iter()) {
                    Ok(row) => {
                        rows.push(row);
                        continue;
                    }
                    Err(reason) => (line, reason),
                }
            }
            Err(e) => {
                let utf8 = if let csv::ErrorKind::Utf8 { pos, err } = e.kind() {
                    Some((
                        pos.as_ref().map_or(0, csv::Position::line),
                        format!("invalid UTF-8 in field {}", err.field() + 1),
                    ))
                } else {
                    None
                };
                match utf8 {
                    Some(malformed) => malformed,
                    None => return Err(csv_error(path, e)),
                }
            }
        };

        match policy {
            MalformedRowPolicy::Fail => return Err(StoreError::MalformedRow { line, reason }),
            MalformedRowPolicy::Skip => {
                warn!(
                    "Skipping malformed row at {}:{line}: {reason}",
                    path.display()
                );
            }
        }
    }

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Append one row, writing the header first if the file is empty.
///
/// Creates the file when missing. A file whose last line lacks a newline
/// gets one before the new row.
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn append(path: &Path, row: &RosterRow) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error(path, e))?;
    let is_empty = file.metadata().map_err(|e| io_error(path, e))?.len() == 0;
    if !is_empty {
        terminate_last_line(&mut file).map_err(|e| io_error(path, e))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_empty {
        writer
            .write_record(HEADER)
            .map_err(|e| csv_error(path, e))?;
    }
    writer
        .write_record(row.fields())
        .map_err(|e| csv_error(path, e))?;
    writer.flush().map_err(|e| io_error(path, e))
}

fn terminate_last_line(file: &mut File) -> io::Result<()> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// Truncate the file and write the header followed by `rows` in order.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn rewrite_all(path: &Path, rows: &[RosterRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(HEADER)
        .map_err(|e| csv_error(path, e))?;
    for row in rows {
        writer
            .write_record(row.fields())
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))
}
