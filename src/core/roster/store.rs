//! The roster store: single owner of the in-memory roster and its file

use super::backing_file::{self, MalformedRowPolicy};
use super::error::{Result, StoreError};
use super::metrics::DerivedMetrics;
use super::row::RosterRow;
use super::validate::validate;
use crate::core::models::StudentRecord;
use logger::info;
use std::path::{Path, PathBuf};

/// Behaviour switches for a [`RosterStore`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Handling of unreadable rows during load
    pub malformed_rows: MalformedRowPolicy,
    /// Reject adds and edits that would duplicate another row's ID
    pub enforce_unique_ids: bool,
}

/// Validate a candidate and compute the row that would be saved for it.
///
/// # Errors
/// Returns [`StoreError::Validation`] if the candidate is incomplete.
pub fn prepare_row(candidate: &StudentRecord) -> Result<RosterRow> {
    validate(candidate)?;
    let metrics = DerivedMetrics::compute(candidate)?;
    Ok(RosterRow::from_record(candidate, &metrics))
}

/// Ordered roster backed by a CSV file.
///
/// Loaded once when opened. Adds append to the file; edits and deletes
/// rewrite it. In-memory rows change only after the file write succeeded.
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    rows: Vec<RosterRow>,
    options: StoreOptions,
}

impl RosterStore {
    /// Open the roster at `path`, loading any existing rows
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, or holds a
    /// malformed row under [`MalformedRowPolicy::Fail`].
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let path = path.into();
        let rows = backing_file::load_all(&path, options.malformed_rows)?;
        Ok(Self {
            path,
            rows,
            options,
        })
    }

    /// Re-read the backing file, replacing the in-memory rows
    ///
    /// # Errors
    /// Same as [`RosterStore::open`]; on error the current rows are kept.
    pub fn reload(&mut self) -> Result<()> {
        self.rows = backing_file::load_all(&self.path, self.options.malformed_rows)?;
        Ok(())
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Options this store was opened with
    #[must_use]
    pub const fn options(&self) -> StoreOptions {
        self.options
    }

    /// All rows in roster order
    #[must_use]
    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the roster has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`
    ///
    /// # Errors
    /// Returns [`StoreError::RowOutOfRange`] for an unknown index.
    pub fn get(&self, index: usize) -> Result<&RosterRow> {
        self.rows.get(index).ok_or(StoreError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Validate, compute, append and remember a new student
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] or [`StoreError::DuplicateId`]
    /// without touching the file, or an I/O error if appending failed.
    pub fn submit_new_student(&mut self, candidate: &StudentRecord) -> Result<&RosterRow> {
        let row = prepare_row(candidate)?;
        self.check_unique_id(&row.id, None)?;

        backing_file::append(&self.path, &row)?;
        info!("Added student {} ({})", row.id, row.name);

        self.rows.push(row);
        let index = self.rows.len() - 1;
        Ok(&self.rows[index])
    }

    /// Replace every field of the row at `index` with `candidate`
    ///
    /// # Errors
    /// Returns [`StoreError::RowOutOfRange`], [`StoreError::Validation`] or
    /// [`StoreError::DuplicateId`] with no side effects, or an I/O error if
    /// the rewrite failed (in which case the in-memory roster is unchanged).
    pub fn submit_modified_student(
        &mut self,
        index: usize,
        candidate: &StudentRecord,
    ) -> Result<&RosterRow> {
        self.get(index)?;
        let row = prepare_row(candidate)?;
        self.check_unique_id(&row.id, Some(index))?;

        let mut updated = self.rows.clone();
        updated[index] = row;
        backing_file::rewrite_all(&self.path, &updated)?;
        self.rows = updated;

        let row = &self.rows[index];
        info!("Modified student {} ({}) at row {index}", row.id, row.name);
        Ok(row)
    }

    /// Remove the row at `index` and rewrite the file
    ///
    /// # Errors
    /// Returns [`StoreError::RowOutOfRange`] for an unknown index, or an I/O
    /// error if the rewrite failed (in which case nothing is removed).
    pub fn delete_student(&mut self, index: usize) -> Result<RosterRow> {
        self.get(index)?;

        let mut updated = self.rows.clone();
        let removed = updated.remove(index);
        backing_file::rewrite_all(&self.path, &updated)?;
        self.rows = updated;

        info!("Deleted student {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Rows whose name or ID contains `filter` (trimmed, case-insensitive),
    /// paired with their roster index. An empty filter matches every row.
    #[must_use]
    pub fn list_visible(&self, filter: &str) -> Vec<(usize, &RosterRow)> {
        let needle = filter.trim().to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.matches(&needle))
            .collect()
    }

    /// Parse the row at `index` back into an editable record
    ///
    /// # Errors
    /// Returns [`StoreError::RowOutOfRange`] for an unknown index, or
    /// [`StoreError::UnreadableRow`] if its subject and grade lists do not
    /// line up or do not parse.
    pub fn candidate_from_row(&self, index: usize) -> Result<StudentRecord> {
        self.get(index)?
            .to_record()
            .map_err(|reason| StoreError::UnreadableRow { index, reason })
    }

    fn check_unique_id(&self, id: &str, except: Option<usize>) -> Result<()> {
        if !self.options.enforce_unique_ids {
            return Ok(());
        }
        let taken = self
            .rows
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != except && row.id == id);
        if taken {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        Ok(())
    }
}
