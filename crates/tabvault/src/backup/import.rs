//! Restoring a backup into a store.
//!
//! ## Strategies
//!
//! - **Merge**: add the backup's documents next to the existing ones.
//! - **Replace**: clear the store first. Destructive; confirming with the user is
//!   the caller's job.
//!
//! ## Duplicate Skipping
//!
//! With `skip_duplicates`, the names present in the store are captured **once**,
//! after the optional clear and before the first record is added. A record whose
//! name is in that snapshot is skipped. Records added during the same import do
//! not join the snapshot, so two new records sharing a name are both imported.
//! Under replace the snapshot is empty and nothing is ever skipped.
//!
//! ## Accounting
//!
//! Each record ends up in exactly one bucket: `imported`, `skipped` or `errors`.
//! Records are handed to the store in one [`DocumentStore::add_many`] batch. A
//! failing add is logged and counted, never propagated, so for every `Ok`
//! result `imported + skipped + errors == editors.len()`. A store that commits
//! the batch in one write counts every record as an error when that write fails.
//!
//! Only a failing clear or name snapshot aborts the import, as
//! [`TabvaultError::ImportFailed`].
//!
//! ## Concurrency
//!
//! Nothing here coordinates with other imports or exports on the same store. Two
//! concurrent merges can read the same name snapshot and both insert a document.
//! Callers that need exclusion go through [`crate::api::EditorApi`].

use super::Backup;
use crate::cancel::CancelToken;
use crate::error::{Result, TabvaultError};
use crate::model::{Document, NewDocument};
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStrategy {
    #[default]
    Merge,
    Replace,
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStrategy::Merge => write!(f, "merge"),
            ImportStrategy::Replace => write!(f, "replace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub strategy: ImportStrategy,
    pub skip_duplicates: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            strategy: ImportStrategy::Merge,
            skip_duplicates: true,
        }
    }
}

impl ImportOptions {
    pub fn merge() -> Self {
        Self {
            strategy: ImportStrategy::Merge,
            skip_duplicates: false,
        }
    }

    pub fn replace() -> Self {
        Self {
            strategy: ImportStrategy::Replace,
            skip_duplicates: false,
        }
    }

    pub fn skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.imported + self.skipped + self.errors
    }

    /// One-line notification text, e.g. `Imported 3 tabs, skipped 1 duplicates.`
    pub fn describe(&self) -> String {
        let mut line = format!(
            "Imported {} tabs, skipped {} duplicates",
            self.imported, self.skipped
        );
        if self.errors > 0 {
            line.push_str(&format!(", {} errors", self.errors));
        }
        line.push('.');
        line
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "imported {}, skipped {}, errors {}",
            self.imported, self.skipped, self.errors
        )
    }
}

/// Feeds the records that still need adding to [`DocumentStore::add_many`],
/// counting skips on the way and stopping once the token is cancelled.
struct PendingRecords<'a> {
    records: std::slice::Iter<'a, Document>,
    existing_names: &'a HashSet<String>,
    skip_duplicates: bool,
    cancel: &'a CancelToken,
    names: Vec<&'a str>,
    skipped: usize,
    cancelled: bool,
}

impl Iterator for PendingRecords<'_> {
    type Item = NewDocument;

    fn next(&mut self) -> Option<NewDocument> {
        while !self.records.as_slice().is_empty() {
            if self.cancel.is_cancelled() {
                self.cancelled = true;
                return None;
            }
            let record = self.records.next()?;
            if self.skip_duplicates && self.existing_names.contains(&record.name) {
                self.skipped += 1;
                continue;
            }
            self.names.push(&record.name);
            return Some(record.clone().into_new());
        }
        None
    }
}

/// Apply `backup` to `store` under `options`.
///
/// The token is checked before anything is touched and between records; a
/// cancelled import returns [`TabvaultError::ImportCancelled`] with the tally so far.
pub fn import_backup<S: DocumentStore + ?Sized>(
    store: &S,
    backup: &Backup,
    options: ImportOptions,
    cancel: &CancelToken,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    if cancel.is_cancelled() {
        return Err(TabvaultError::ImportCancelled { summary });
    }

    debug!(
        strategy = %options.strategy,
        skip_duplicates = options.skip_duplicates,
        records = backup.editors.len(),
        "Importing backup"
    );

    if options.strategy == ImportStrategy::Replace {
        store.clear().map_err(TabvaultError::import_failed)?;
    }

    let existing_names: HashSet<String> = if options.skip_duplicates {
        store
            .list()
            .map_err(TabvaultError::import_failed)?
            .into_iter()
            .map(|doc| doc.name)
            .collect()
    } else {
        HashSet::new()
    };

    let mut pending = PendingRecords {
        records: backup.editors.iter(),
        existing_names: &existing_names,
        skip_duplicates: options.skip_duplicates,
        cancel,
        names: Vec::new(),
        skipped: 0,
        cancelled: false,
    };
    let results = store.add_many(&mut pending);

    summary.skipped = pending.skipped;
    for (name, result) in pending.names.iter().zip(results) {
        match result {
            Ok(_) => summary.imported += 1,
            Err(err) => {
                warn!(%name, error = %err, "Error importing document");
                summary.errors += 1;
            }
        }
    }

    if pending.cancelled {
        warn!(%summary, "Import cancelled");
        return Err(TabvaultError::ImportCancelled { summary });
    }

    debug!(%summary, "Import finished");
    Ok(summary)
}
