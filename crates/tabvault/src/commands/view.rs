use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::DocumentId;
use crate::store::DocumentStore;

pub fn run<S: DocumentStore + ?Sized>(store: &S, ids: &[DocumentId]) -> Result<CmdResult> {
    let documents = ids
        .iter()
        .map(|id| store.get(*id))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_documents(documents))
}
