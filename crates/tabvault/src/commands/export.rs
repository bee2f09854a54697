use crate::backup::{export_backup, SaveTarget};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;

pub fn run<S, T>(store: &S, target: &T) -> Result<CmdResult>
where
    S: DocumentStore + ?Sized,
    T: SaveTarget + ?Sized,
{
    let report = export_backup(store, target)?;
    let location = target.location(&report.filename);

    let mut result = CmdResult::default();
    let shown = location
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| report.filename.clone());
    result.add_message(CmdMessage::success(format!(
        "Exported {} tabs to {}",
        report.exported, shown
    )));
    result.export_path = location;
    Ok(result)
}
