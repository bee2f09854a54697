use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TabvaultError};
use crate::model::{Attributes, NewDocument};
use crate::store::DocumentStore;
use chrono::Utc;

/// Optional attributes for a new document.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub color: Option<String>,
    pub pinned: bool,
}

pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    name: String,
    content: String,
    options: CreateOptions,
) -> Result<CmdResult> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(TabvaultError::Api("Name cannot be empty".to_string()));
    }

    // New documents go to the end of the tab strip.
    let order = store
        .list()?
        .iter()
        .filter_map(|doc| doc.attributes.order())
        .max()
        .map_or(1, |max| max.saturating_add(1));

    let now = Utc::now();
    let mut doc = NewDocument::new(name, content).with_attribute(Attributes::ORDER, order);
    doc.attributes.set_timestamp(Attributes::CREATED_AT, now);
    doc.attributes.set_timestamp(Attributes::UPDATED_AT, now);
    if let Some(color) = options.color {
        doc.attributes.set(Attributes::COLOR, color);
    }
    if options.pinned {
        doc.attributes.set(Attributes::IS_PINNED, true);
    }

    let id = store.add(doc)?;
    let created = store.get(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document created ({}): {}",
        created.id, created.name
    )));
    result.affected_documents.push(created);
    Ok(result)
}
