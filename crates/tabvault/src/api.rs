//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for clients.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs**: id selectors such as `"3"` or `"1-4"`
//! - **Serializes whole-store operations**: export and import hold an internal
//!   lock for their full duration
//!
//! It contains no business logic and performs no terminal I/O.
//!
//! ## Id Selectors
//!
//! - Single id: `N` (`1`, `42`)
//! - Range: `Start-End` (`2-5`), inclusive, start ≤ end
//!
//! Duplicates are dropped, first occurrence wins.
//!
//! ## Export/Import Exclusion
//!
//! The raw backup functions do not coordinate with each other. Two imports running
//! against one store at once can read the same name snapshot and both insert the
//! same document. [`EditorApi`] takes `op_lock` around every export and import,
//! so callers sharing one `EditorApi` never interleave them. Single-document
//! commands do not take the lock.
//!
//! ## Generic Over DocumentStore
//!
//! - Production: `EditorApi<FileStore>`
//! - Testing: `EditorApi<InMemoryStore>`

use crate::backup::{ImportOptions, SaveTarget};
use crate::cancel::CancelToken;
use crate::commands::{self, create::CreateOptions, update::DocumentEdit, CmdResult};
use crate::error::{Result, TabvaultError};
use crate::model::DocumentId;
use crate::search::SearchOptions;
use crate::store::DocumentStore;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct EditorApi<S: DocumentStore> {
    store: S,
    op_lock: Mutex<()>,
}

impl<S: DocumentStore> EditorApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            op_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_document(
        &self,
        name: String,
        content: String,
        options: CreateOptions,
    ) -> Result<CmdResult> {
        commands::create::run(&self.store, name, content, options)
    }

    pub fn list_documents(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_documents<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let ids = parse_ids(selectors)?;
        commands::view::run(&self.store, &ids)
    }

    pub fn update_document(&self, selector: &str, edit: DocumentEdit) -> Result<CmdResult> {
        let id = parse_id(selector)?;
        commands::update::run(&self.store, id, edit)
    }

    pub fn delete_documents<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let ids = parse_ids(selectors)?;
        commands::delete::run(&self.store, &ids)
    }

    pub fn search(&self, query: &str, options: SearchOptions) -> Result<CmdResult> {
        commands::search::run(&self.store, query, options)
    }

    pub fn export_backup<T: SaveTarget + ?Sized>(&self, target: &T) -> Result<CmdResult> {
        let _guard = self.lock()?;
        commands::export::run(&self.store, target)
    }

    pub fn import_backup(
        &self,
        path: &Path,
        options: ImportOptions,
        cancel: &CancelToken,
    ) -> Result<CmdResult> {
        let _guard = self.lock()?;
        commands::import::run(&self.store, path, options, cancel)
    }

    pub fn inspect_backup(&self, path: &Path, cancel: &CancelToken) -> Result<CmdResult> {
        commands::inspect::run(path, cancel)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.op_lock
            .lock()
            .map_err(|_| TabvaultError::Api("Backup operation lock poisoned".to_string()))
    }
}

fn parse_id(input: &str) -> Result<DocumentId> {
    let trimmed = input.trim();
    trimmed
        .parse::<DocumentId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| TabvaultError::Api(format!("Invalid document id: {}", trimmed)))
}

fn parse_ids<I: AsRef<str>>(selectors: &[I]) -> Result<Vec<DocumentId>> {
    let mut ids: Vec<DocumentId> = Vec::new();
    for selector in selectors {
        let selector = selector.as_ref().trim();
        let expanded = match selector.split_once('-') {
            Some((start, end)) => {
                let start = parse_id(start)?;
                let end = parse_id(end)?;
                if start > end {
                    return Err(TabvaultError::Api(format!(
                        "Invalid range: {} (start is after end)",
                        selector
                    )));
                }
                (start..=end).collect()
            }
            None => vec![parse_id(selector)?],
        };
        for id in expanded {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    if ids.is_empty() {
        return Err(TabvaultError::Api("No document ids given".to_string()));
    }
    Ok(ids)
}
