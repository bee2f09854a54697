use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DocumentId;
use crate::store::DocumentStore;

/// Delete documents by id. Every id is looked up before anything is removed.
pub fn run<S: DocumentStore + ?Sized>(store: &S, ids: &[DocumentId]) -> Result<CmdResult> {
    let documents = ids
        .iter()
        .map(|id| store.get(*id))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for doc in documents {
        store.delete(doc.id)?;
        result.add_message(CmdMessage::success(format!(
            "Document deleted ({}): {}",
            doc.id, doc.name
        )));
        result.affected_documents.push(doc);
    }
    Ok(result)
}
