use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TabvaultError};
use crate::model::{Attributes, DocumentId};
use crate::store::DocumentStore;
use chrono::Utc;

/// Fields to change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct DocumentEdit {
    pub name: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    /// An empty string removes the color.
    pub color: Option<String>,
}

impl DocumentEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.pinned.is_none() && self.color.is_none()
    }
}

pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    id: DocumentId,
    edit: DocumentEdit,
) -> Result<CmdResult> {
    let mut doc = store.get(id)?.into_new();
    let mut result = CmdResult::default();

    if edit.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update"));
        result.affected_documents.push(doc.into_document(id));
        return Ok(result);
    }

    if let Some(name) = edit.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TabvaultError::Api("Name cannot be empty".to_string()));
        }
        doc.name = name;
    }
    if let Some(content) = edit.content {
        doc.content = content;
    }
    match edit.pinned {
        Some(true) => doc.attributes.set(Attributes::IS_PINNED, true),
        Some(false) => {
            doc.attributes.remove(Attributes::IS_PINNED);
        }
        None => {}
    }
    match edit.color {
        Some(color) if color.is_empty() => {
            doc.attributes.remove(Attributes::COLOR);
        }
        Some(color) => doc.attributes.set(Attributes::COLOR, color),
        None => {}
    }
    doc.attributes.set_timestamp(Attributes::UPDATED_AT, Utc::now());

    store.update(id, doc)?;
    let updated = store.get(id)?;
    result.add_message(CmdMessage::success(format!(
        "Document updated ({}): {}",
        updated.id, updated.name
    )));
    result.affected_documents.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create::{self, CreateOptions};
    use crate::store::memory::InMemoryStore;

    fn store_with_doc() -> InMemoryStore {
        let store = InMemoryStore::new();
        create::run(
            &store,
            "draft.md".into(),
            "first".into(),
            CreateOptions {
                color: Some("#3b82f6".into()),
                pinned: false,
            },
        )
        .unwrap();
        store
    }

    #[test]
    fn test_update_content_bumps_updated_at() {
        let store = store_with_doc();
        let before = store.get(1).unwrap();

        let edit = DocumentEdit {
            content: Some("second".into()),
            ..Default::default()
        };
        let result = run(&store, 1, edit).unwrap();

        let after = &result.affected_documents[0];
        assert_eq!(after.content, "second");
        assert_eq!(after.name, "draft.md");
        assert_eq!(after.attributes.created_at(), before.attributes.created_at());
        assert!(after.attributes.updated_at() >= before.attributes.updated_at());
        assert_eq!(after.attributes.order(), Some(1));
    }

    #[test]
    fn test_pin_rename_and_clear_color() {
        let store = store_with_doc();
        let edit = DocumentEdit {
            name: Some("final.md".into()),
            pinned: Some(true),
            color: Some(String::new()),
            ..Default::default()
        };
        run(&store, 1, edit).unwrap();

        let doc = store.get(1).unwrap();
        assert_eq!(doc.name, "final.md");
        assert!(doc.attributes.is_pinned());
        assert_eq!(doc.attributes.color(), None);

        run(
            &store,
            1,
            DocumentEdit {
                pinned: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!store.get(1).unwrap().attributes.is_pinned());
    }

    #[test]
    fn test_empty_edit_changes_nothing() {
        let store = store_with_doc();
        let before = store.get(1).unwrap();
        let result = run(&store, 1, DocumentEdit::default()).unwrap();

        assert_eq!(result.messages[0].content, "Nothing to update");
        assert_eq!(store.get(1).unwrap(), before);
    }

    #[test]
    fn test_blank_name_rejected() {
        let store = store_with_doc();
        let edit = DocumentEdit {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(run(&store, 1, edit).is_err());
        assert_eq!(store.get(1).unwrap().name, "draft.md");
    }

    #[test]
    fn test_missing_document() {
        let store = InMemoryStore::new();
        assert!(matches!(
            run(&store, 5, DocumentEdit::default()),
            Err(TabvaultError::DocumentNotFound(5))
        ));
    }
}
