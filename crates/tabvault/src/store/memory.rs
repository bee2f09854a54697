use super::DocumentStore;
use crate::error::{Result, TabvaultError};
use crate::model::{Document, DocumentId, NewDocument};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

struct State {
    next_id: DocumentId,
    documents: BTreeMap<DocumentId, Document>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            next_id: 1,
            documents: BTreeMap::new(),
        }
    }
}

#[derive(Default)]
struct Faults {
    fail_add: bool,
    fail_add_names: HashSet<String>,
    fail_clear: bool,
    fail_list: bool,
}

/// In-memory document store for testing.
///
/// Uses `Mutex` rather than `RefCell` so one store can be shared between threads
/// when exercising concurrent imports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    faults: Mutex<Faults>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `add` fail, as a full quota would.
    pub fn set_simulate_add_error(&self, simulate: bool) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.fail_add = simulate;
        }
    }

    /// Make `add` fail only for documents with this exact name.
    pub fn fail_add_for_name(&self, name: impl Into<String>) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.fail_add_names.insert(name.into());
        }
    }

    pub fn set_simulate_clear_error(&self, simulate: bool) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.fail_clear = simulate;
        }
    }

    pub fn set_simulate_list_error(&self, simulate: bool) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.fail_list = simulate;
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| TabvaultError::Store("Document store lock poisoned".to_string()))
    }

    fn faults(&self) -> Result<MutexGuard<'_, Faults>> {
        self.faults
            .lock()
            .map_err(|_| TabvaultError::Store("Document store lock poisoned".to_string()))
    }
}

impl DocumentStore for InMemoryStore {
    fn add(&self, doc: NewDocument) -> Result<DocumentId> {
        {
            let faults = self.faults()?;
            if faults.fail_add || faults.fail_add_names.contains(&doc.name) {
                return Err(TabvaultError::Store("Simulated add error".to_string()));
            }
        }

        let mut state = self.state()?;
        let id = state.next_id;
        state.next_id += 1;
        state.documents.insert(id, doc.into_document(id));
        Ok(id)
    }

    fn get(&self, id: DocumentId) -> Result<Document> {
        self.state()?
            .documents
            .get(&id)
            .cloned()
            .ok_or(TabvaultError::DocumentNotFound(id))
    }

    fn list(&self) -> Result<Vec<Document>> {
        if self.faults()?.fail_list {
            return Err(TabvaultError::Store("Simulated list error".to_string()));
        }
        Ok(self.state()?.documents.values().cloned().collect())
    }

    fn update(&self, id: DocumentId, doc: NewDocument) -> Result<()> {
        let mut state = self.state()?;
        match state.documents.get_mut(&id) {
            Some(existing) => {
                *existing = doc.into_document(id);
                Ok(())
            }
            None => Err(TabvaultError::DocumentNotFound(id)),
        }
    }

    fn delete(&self, id: DocumentId) -> Result<()> {
        let mut state = self.state()?;
        state
            .documents
            .remove(&id)
            .map(|_| ())
            .ok_or(TabvaultError::DocumentNotFound(id))
    }

    fn clear(&self) -> Result<()> {
        if self.faults()?.fail_clear {
            return Err(TabvaultError::Store("Simulated clear error".to_string()));
        }
        self.state()?.documents.clear();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Attributes;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_documents(self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Test File {}.txt", i + 1);
                let content = format!("This is test content for file {}", i + 1);
                self.store.add(NewDocument::new(name, content)).unwrap();
            }
            self
        }

        pub fn with_document(self, name: &str, content: &str) -> Self {
            self.store.add(NewDocument::new(name, content)).unwrap();
            self
        }

        pub fn with_pinned_document(self, name: &str) -> Self {
            let doc = NewDocument::new(name, "Pinned content")
                .with_attribute(Attributes::IS_PINNED, true);
            self.store.add(doc).unwrap();
            self
        }

        pub fn names(&self) -> Vec<String> {
            self.store
                .list()
                .unwrap()
                .into_iter()
                .map(|d| d.name)
                .collect()
        }
    }
}
