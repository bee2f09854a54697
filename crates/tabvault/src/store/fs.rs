use super::DocumentStore;
use crate::error::{Result, TabvaultError};
use crate::model::{Document, DocumentId, NewDocument};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DATA_FILE: &str = "documents.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataFile {
    #[serde(default)]
    next_id: DocumentId,
    #[serde(default)]
    documents: Vec<Document>,
}

impl DataFile {
    /// Next id to hand out, never below 1 and never colliding with a stored id.
    fn allocate_id(&mut self) -> DocumentId {
        let max_stored = self.documents.iter().map(|d| d.id).max().unwrap_or(0);
        let id = self.next_id.max(max_stored + 1).max(1);
        self.next_id = id + 1;
        id
    }
}

/// File-backed document store.
///
/// Every mutation rewrites `documents.json` atomically (write to a temp file,
/// then rename), so a crash never leaves a half-written store behind.
pub struct FileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| TabvaultError::Store("Document store lock poisoned".to_string()))
    }

    fn load(&self) -> Result<DataFile> {
        let path = self.data_file();
        if !path.exists() {
            return Ok(DataFile::default());
        }
        let content = fs::read_to_string(&path).map_err(TabvaultError::Io)?;
        if content.trim().is_empty() {
            return Ok(DataFile::default());
        }
        let mut data: DataFile =
            serde_json::from_str(&content).map_err(TabvaultError::Serialization)?;
        data.documents.sort_by_key(|d| d.id);
        Ok(data)
    }

    fn save(&self, data: &DataFile) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TabvaultError::Io)?;
        }
        let content = serde_json::to_string_pretty(data).map_err(TabvaultError::Serialization)?;

        let tmp_file = self.root.join(format!(".documents-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(TabvaultError::Io)?;
        fs::rename(&tmp_file, self.data_file()).map_err(TabvaultError::Io)?;
        Ok(())
    }

    fn append(&self, docs: Vec<NewDocument>) -> Result<Vec<DocumentId>> {
        let _guard = self.guard()?;
        let mut data = self.load()?;
        let ids = docs
            .into_iter()
            .map(|doc| {
                let id = data.allocate_id();
                data.documents.push(doc.into_document(id));
                id
            })
            .collect();
        self.save(&data)?;
        Ok(ids)
    }
}

impl DocumentStore for FileStore {
    fn add(&self, doc: NewDocument) -> Result<DocumentId> {
        let _guard = self.guard()?;
        let mut data = self.load()?;
        let id = data.allocate_id();
        data.documents.push(doc.into_document(id));
        self.save(&data)?;
        Ok(id)
    }

    /// One load and one atomic write for the whole batch. If either fails,
    /// nothing is stored and every document gets an error.
    fn add_many(&self, docs: &mut dyn Iterator<Item = NewDocument>) -> Vec<Result<DocumentId>> {
        let docs: Vec<NewDocument> = docs.collect();
        if docs.is_empty() {
            return Vec::new();
        }
        let count = docs.len();

        match self.append(docs) {
            Ok(ids) => {
                debug!(count, "Added document batch");
                ids.into_iter().map(Ok).collect()
            }
            Err(err) => {
                warn!(count, error = %err, "Failed to add document batch");
                let message = err.to_string();
                (0..count)
                    .map(|_| Err(TabvaultError::Store(message.clone())))
                    .collect()
            }
        }
    }

    fn get(&self, id: DocumentId) -> Result<Document> {
        let _guard = self.guard()?;
        self.load()?
            .documents
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(TabvaultError::DocumentNotFound(id))
    }

    fn list(&self) -> Result<Vec<Document>> {
        let _guard = self.guard()?;
        Ok(self.load()?.documents)
    }

    fn update(&self, id: DocumentId, doc: NewDocument) -> Result<()> {
        let _guard = self.guard()?;
        let mut data = self.load()?;
        let slot = data
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(TabvaultError::DocumentNotFound(id))?;
        *slot = doc.into_document(id);
        self.save(&data)
    }

    fn delete(&self, id: DocumentId) -> Result<()> {
        let _guard = self.guard()?;
        let mut data = self.load()?;
        let before = data.documents.len();
        data.documents.retain(|d| d.id != id);
        if data.documents.len() == before {
            return Err(TabvaultError::DocumentNotFound(id));
        }
        self.save(&data)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.guard()?;
        let mut data = self.load()?;
        // Keep the counter so cleared ids are never handed out again.
        data.next_id = data.allocate_id();
        data.documents.clear();
        self.save(&data)
    }
}
