use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::{self as matcher, SearchOptions};
use crate::store::DocumentStore;

pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    query: &str,
    options: SearchOptions,
) -> Result<CmdResult> {
    let documents = store.list()?;
    let results = matcher::search(&documents, query, options)?;

    let mut result = CmdResult::default();
    if results.is_empty() {
        result.add_message(CmdMessage::info("No matches found"));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} match(es) in {} file(s)",
            matcher::total_matches(&results),
            results.len()
        )));
    }
    result.search_results = results;
    Ok(result)
}
