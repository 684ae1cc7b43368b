//! JSON-file submission store.
//!
//! The data file is a JSON array of rows in sheet column order
//! (name, email, phone, message, timestamp); missing fields default to
//! empty strings, matching how the sheet tolerates short rows. Ids are
//! row numbers assigned on every fetch (the first array element is row 2,
//! because row 1 is the sheet's header), so deleting a row renumbers the
//! ones after it on the next fetch, exactly like deleting a sheet row.

use crate::model::{RowId, StoreError, Submission, SubmissionPatch, Timestamp};
use crate::store::SubmissionStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// One stored row; the on-disk shape of a submission without its id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StoredRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    timestamp: String,
}

/// File-backed [`SubmissionStore`].
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// A store over the given data file. The file is read lazily; a
    /// missing file surfaces as `StoreError::NotFound` on first fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load_rows(&self) -> Result<Vec<StoredRow>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound {
                path: self.path.clone(),
            });
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save_rows(&self, rows: &[StoredRow]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(rows).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Array index for a row id, bounds-checked against the loaded rows.
    fn index_of(&self, id: RowId, rows: &[StoredRow]) -> Result<usize, StoreError> {
        let index = (id.as_u32() - 2) as usize;
        if index >= rows.len() {
            return Err(StoreError::UnknownRow { id });
        }
        Ok(index)
    }
}

impl SubmissionStore for JsonStore {
    fn fetch_all(&mut self) -> Result<Vec<Submission>, StoreError> {
        let rows = self.load_rows()?;
        debug!(count = rows.len(), path = %self.path.display(), "Fetched submissions");
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                Submission::new(
                    RowId::from_index(index),
                    row.name,
                    row.email,
                    row.phone,
                    row.message,
                    Timestamp::new(row.timestamp),
                )
            })
            .collect())
    }

    fn update(&mut self, id: RowId, patch: &SubmissionPatch) -> Result<(), StoreError> {
        if patch.name.trim().is_empty() {
            return Err(StoreError::RejectedEdit {
                reason: "name is required",
            });
        }
        if patch.email.trim().is_empty() {
            return Err(StoreError::RejectedEdit {
                reason: "email is required",
            });
        }

        let mut rows = self.load_rows()?;
        let index = self.index_of(id, &rows)?;

        // Timestamp column is untouched, like the sheet update range A:D.
        rows[index].name = patch.name.clone();
        rows[index].email = patch.email.clone();
        rows[index].phone = patch.phone.clone();
        rows[index].message = patch.message.clone();

        self.save_rows(&rows)?;
        debug!(%id, "Updated submission");
        Ok(())
    }

    fn delete(&mut self, id: RowId) -> Result<(), StoreError> {
        let mut rows = self.load_rows()?;
        let index = self.index_of(id, &rows)?;
        rows.remove(index);
        self.save_rows(&rows)?;
        debug!(%id, "Deleted submission");
        Ok(())
    }
}

// ===== Tests =====
