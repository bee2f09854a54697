use crate::backup::{import_backup, parse_backup_path, ImportOptions, ImportStrategy};
use crate::cancel::CancelToken;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;
use std::path::Path;

/// Parse the backup at `path` and apply it.
///
/// Parse and validation errors surface before the store is touched, so a bad
/// file never clears anything under replace.
pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    path: &Path,
    options: ImportOptions,
    cancel: &CancelToken,
) -> Result<CmdResult> {
    let backup = parse_backup_path(path, cancel)?;
    let summary = import_backup(store, &backup, options, cancel)?;

    let mut result = CmdResult::default();
    if options.strategy == ImportStrategy::Replace {
        result.add_message(CmdMessage::info("Existing tabs were replaced"));
    }
    if summary.errors > 0 && summary.imported == 0 {
        result.add_message(CmdMessage::error(summary.describe()));
    } else if summary.errors > 0 {
        result.add_message(CmdMessage::warning(summary.describe()));
    } else {
        result.add_message(CmdMessage::success(summary.describe()));
    }
    result.import_summary = Some(summary);
    Ok(result)
}
