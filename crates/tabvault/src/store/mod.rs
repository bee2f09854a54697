//! # Storage Layer
//!
//! The [`DocumentStore`] trait is the only way the rest of the crate touches
//! persisted documents. The backup pipeline treats it as a key-value table keyed
//! by an autogenerated integer id.
//!
//! ## Design Rationale
//!
//! The store is injected, never global:
//! - Commands and the backup pipeline are tested against [`memory::InMemoryStore`]
//! - Production clients use [`fs::FileStore`]
//! - Serialization of whole-store operations (export/import) is added by the
//!   caller, see [`crate::api::EditorApi`]
//!
//! All methods take `&self`. Implementations use interior mutability, so a single
//! store can be shared by reference (or `Arc`) across callers and threads.
//!
//! ## Ids
//!
//! - `add` assigns a fresh id, starting at 1
//! - Ids are never reused, not even after `clear`
//! - `list` returns documents in id (insertion) order
//! - `add_many` hands out ids in iteration order, one result per document
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: A single `documents.json` in a data directory, atomically rewritten
//! - [`memory::InMemoryStore`]: No persistence, with fault injection for tests
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── documents.json      # { "nextId": 4, "documents": [ {...}, ... ] }
//! ```

use crate::error::Result;
use crate::model::{Document, DocumentId, NewDocument};

pub mod fs;
pub mod memory;

/// Abstract interface for document storage.
pub trait DocumentStore {
    /// Insert a document, returning its newly assigned id.
    fn add(&self, doc: NewDocument) -> Result<DocumentId>;

    /// Insert documents pulled from `docs`, one result per document, in order.
    ///
    /// The default adds them one by one. Stores with a costly commit override it
    /// to write once for the whole batch.
    fn add_many(&self, docs: &mut dyn Iterator<Item = NewDocument>) -> Vec<Result<DocumentId>> {
        docs.map(|doc| self.add(doc)).collect()
    }

    /// Get a document by id.
    fn get(&self, id: DocumentId) -> Result<Document>;

    /// Snapshot of every document, in id order.
    fn list(&self) -> Result<Vec<Document>>;

    /// Replace the name, content and attributes of an existing document.
    fn update(&self, id: DocumentId, doc: NewDocument) -> Result<()>;

    /// Delete a document.
    fn delete(&self, id: DocumentId) -> Result<()>;

    /// Delete every document.
    fn clear(&self) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn add(&self, doc: NewDocument) -> Result<DocumentId> {
        (**self).add(doc)
    }

    fn add_many(&self, docs: &mut dyn Iterator<Item = NewDocument>) -> Vec<Result<DocumentId>> {
        (**self).add_many(docs)
    }

    fn get(&self, id: DocumentId) -> Result<Document> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Document>> {
        (**self).list()
    }

    fn update(&self, id: DocumentId, doc: NewDocument) -> Result<()> {
        (**self).update(id, doc)
    }

    fn delete(&self, id: DocumentId) -> Result<()> {
        (**self).delete(id)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn add(&self, doc: NewDocument) -> Result<DocumentId> {
        (**self).add(doc)
    }

    fn add_many(&self, docs: &mut dyn Iterator<Item = NewDocument>) -> Vec<Result<DocumentId>> {
        (**self).add_many(docs)
    }

    fn get(&self, id: DocumentId) -> Result<Document> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Document>> {
        (**self).list()
    }

    fn update(&self, id: DocumentId, doc: NewDocument) -> Result<()> {
        (**self).update(id, doc)
    }

    fn delete(&self, id: DocumentId) -> Result<()> {
        (**self).delete(id)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
