use super::{Backup, BackupMetadata, BACKUP_VERSION, EXPORTED_BY};
use crate::error::{Result, TabvaultError};
use crate::model::{iso_timestamp, Document};
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const BACKUP_MIME_TYPE: &str = "application/json;charset=utf-8";

/// Bytes plus a MIME type, as handed to a save dialog or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Save-to-disk collaborator.
pub trait SaveTarget {
    fn save_as(&self, blob: Blob, filename: &str) -> Result<()>;

    /// Where `filename` ends up, for targets that know.
    fn location(&self, _filename: &str) -> Option<PathBuf> {
        None
    }
}

/// Saves backups into a directory, replacing a same-named file atomically.
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectoryTarget {
    fn save_as(&self, blob: Blob, filename: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(TabvaultError::Io)?;
        }
        let tmp_file = self.dir.join(format!(".backup-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, &blob.bytes).map_err(TabvaultError::Io)?;
        fs::rename(&tmp_file, self.dir.join(filename)).map_err(TabvaultError::Io)?;
        Ok(())
    }

    fn location(&self, filename: &str) -> Option<PathBuf> {
        Some(self.dir.join(filename))
    }
}

/// What a successful export handed to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub filename: String,
    /// Documents in the saved backup.
    pub exported: usize,
}

/// `text-editor-backup-YYYY-MM-DD.json` for the day of `now`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("text-editor-backup-{}.json", now.format("%Y-%m-%d"))
}

/// Wrap documents in a fresh envelope stamped with `now`.
pub fn build_backup(documents: Vec<Document>, now: DateTime<Utc>) -> Backup {
    let total_tabs = documents.len() as u64;
    Backup {
        version: BACKUP_VERSION.to_string(),
        timestamp: iso_timestamp(now),
        editors: documents,
        metadata: BackupMetadata {
            total_tabs,
            exported_by: EXPORTED_BY.to_string(),
        },
    }
}

/// Export every document to `target`.
pub fn export_backup<S, T>(store: &S, target: &T) -> Result<ExportReport>
where
    S: DocumentStore + ?Sized,
    T: SaveTarget + ?Sized,
{
    export_backup_at(store, target, Utc::now())
}

/// [`export_backup`] with an explicit clock.
///
/// Any failure is reported as [`TabvaultError::ExportFailed`]; nothing reaches
/// the target unless the snapshot was read and serialized completely.
pub fn export_backup_at<S, T>(
    store: &S,
    target: &T,
    now: DateTime<Utc>,
) -> Result<ExportReport>
where
    S: DocumentStore + ?Sized,
    T: SaveTarget + ?Sized,
{
    let (json, exported) = render_backup(store, now).map_err(TabvaultError::export_failed)?;
    let filename = export_filename(now);

    let blob = Blob {
        bytes: json.into_bytes(),
        mime_type: BACKUP_MIME_TYPE,
    };
    target
        .save_as(blob, &filename)
        .map_err(TabvaultError::export_failed)?;

    debug!(filename = %filename, exported, "Exported backup");
    Ok(ExportReport { filename, exported })
}

fn render_backup<S: DocumentStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<(String, usize)> {
    let documents = store.list()?;
    debug!(documents = documents.len(), "Building backup");
    let backup = build_backup(documents, now);
    let json = serde_json::to_string_pretty(&backup).map_err(TabvaultError::Serialization)?;
    Ok((json, backup.editors.len()))
}
