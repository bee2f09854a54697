//! # Backup and Restore
//!
//! A backup is a single JSON document holding every document in the store:
//!
//! ```text
//! {
//!   "version": "1.0.0",
//!   "timestamp": "2024-01-01T00:00:00.000Z",
//!   "editors": [ { "id": 1, "name": "a.md", "content": "...", ...attributes }, ... ],
//!   "metadata": { "totalTabs": 1, "exportedBy": "Simple Text Editor" }
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`export`]: `store.list()` → [`Backup`] → pretty JSON → [`SaveTarget::save_as`]
//! 2. [`parse`]: file name/size guards → chunked, cancellable read → text → JSON
//! 3. [`validate`]: JSON → [`Backup`], or the first positional [`FormatError`]
//! 4. [`import`]: [`Backup`] → store, under merge or replace, with a tally
//!
//! ## Format Versioning
//!
//! Only one format exists (`1.0.0`). The validator checks that `version` and
//! `timestamp` are present, never what they say. `metadata` is informational and
//! never checked against `editors`.
//!
//! ## Obtaining a Backup
//!
//! [`Backup`] deliberately does not implement `Deserialize`. The only ways to get
//! one are [`validate::decode`] (untrusted JSON) and [`export::build_backup`]
//! (typed documents), so the importer never sees an unchecked record.

use crate::model::Document;
use serde::Serialize;

pub mod export;
pub mod import;
pub mod parse;
pub mod validate;

pub use export::{export_backup, Blob, DirectoryTarget, ExportReport, SaveTarget};
pub use import::{import_backup, ImportOptions, ImportStrategy, ImportSummary};
pub use parse::{parse_backup_file, parse_backup_path, BackupFile, ParseError};
pub use validate::{decode, validate, FormatError};

/// The only backup format version this crate writes.
pub const BACKUP_VERSION: &str = "1.0.0";

/// Producer tag written into `metadata.exportedBy`.
pub const EXPORTED_BY: &str = "Simple Text Editor";

/// Largest backup file accepted by the parser (10 MiB).
pub const MAX_BACKUP_SIZE: u64 = 10 * 1024 * 1024;

/// A versioned snapshot of the whole document store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Backup {
    pub version: String,
    pub timestamp: String,
    pub editors: Vec<Document>,
    pub metadata: BackupMetadata,
}

/// Descriptive envelope metadata. Not validated on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub total_tabs: u64,
    pub exported_by: String,
}
