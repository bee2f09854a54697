use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Document;
use crate::store::DocumentStore;
use std::cmp::Ordering;

/// Tab strip order: pinned documents first, then by `order`, then by id.
/// Documents without an `order` sort after those with one.
pub fn display_order(a: &Document, b: &Document) -> Ordering {
    b.attributes
        .is_pinned()
        .cmp(&a.attributes.is_pinned())
        .then_with(|| match (a.attributes.order(), b.attributes.order()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

pub fn run<S: DocumentStore + ?Sized>(store: &S) -> Result<CmdResult> {
    let mut documents = store.list()?;
    documents.sort_by(display_order);
    Ok(CmdResult::default().with_listed_documents(documents))
}
