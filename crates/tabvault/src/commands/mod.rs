//! # Command Layer
//!
//! Each command lives in its own submodule as a plain `run` function over a
//! [`DocumentStore`](crate::store::DocumentStore). Commands hold the business
//! logic and are UI-agnostic:
//!
//! - No stdout/stderr, no prompts, no exit codes
//! - Return a structured [`CmdResult`] that the client renders
//!
//! Destructive flows (import with replace) expect the client to have asked the
//! user already. Commands never ask.
//!
//! ## Testing
//!
//! Most behavioural tests live here, against `InMemoryStore`.
//!
//! ## Command Modules
//!
//! - [`create`]: Add a document
//! - [`list`]: List documents, pinned first
//! - [`view`]: Fetch documents by id
//! - [`update`]: Edit name, content, pin state or color
//! - [`delete`]: Remove documents
//! - [`search`]: Search across all documents
//! - [`export`]: Write a backup file
//! - [`import`]: Restore from a backup file
//! - [`inspect`]: Summarise a backup file without importing it

use crate::backup::ImportSummary;
use crate::model::Document;
use crate::search::DocumentMatches;
use serde::Serialize;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod inspect;
pub mod list;
pub mod search;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Summary of a backup file that was read but not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInfo {
    pub version: String,
    pub timestamp: String,
    pub exported_by: String,
    pub declared_tabs: u64,
    pub tab_names: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Documents created, changed or removed by the command.
    pub affected_documents: Vec<Document>,
    /// Documents to display.
    pub listed_documents: Vec<Document>,
    pub search_results: Vec<DocumentMatches>,
    pub import_summary: Option<ImportSummary>,
    pub export_path: Option<PathBuf>,
    pub backup_info: Option<BackupInfo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_documents(mut self, documents: Vec<Document>) -> Self {
        self.affected_documents = documents;
        self
    }

    pub fn with_listed_documents(mut self, documents: Vec<Document>) -> Self {
        self.listed_documents = documents;
        self
    }
}
