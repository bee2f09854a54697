use crate::backup::parse_backup_path;
use crate::cancel::CancelToken;
use crate::commands::{BackupInfo, CmdMessage, CmdResult};
use crate::error::Result;
use std::path::Path;

/// Read and validate a backup without importing it.
pub fn run(path: &Path, cancel: &CancelToken) -> Result<CmdResult> {
    let backup = parse_backup_path(path, cancel)?;

    let info = BackupInfo {
        version: backup.version,
        timestamp: backup.timestamp,
        exported_by: backup.metadata.exported_by,
        declared_tabs: backup.metadata.total_tabs,
        tab_names: backup.editors.iter().map(|doc| doc.name.clone()).collect(),
    };

    let mut result = CmdResult::default();
    if info.declared_tabs != info.tab_names.len() as u64 {
        result.add_message(CmdMessage::warning(format!(
            "Metadata declares {} tabs but the backup holds {}",
            info.declared_tabs,
            info.tab_names.len()
        )));
    }
    result.add_message(CmdMessage::info(format!(
        "Valid backup with {} tabs",
        info.tab_names.len()
    )));
    result.listed_documents = backup.editors;
    result.backup_info = Some(info);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use std::fs;

    #[test]
    fn test_inspect_summarises_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.json");
        fs::write(
            &path,
            r##"{
                "version": "1.0.0",
                "timestamp": "2024-01-01T00:00:00.000Z",
                "editors": [
                    {"id": 1, "name": "a.md", "content": "A"},
                    {"id": 2, "name": "b.md", "content": "B", "color": "#fff"}
                ],
                "metadata": {"totalTabs": 5, "exportedBy": "Simple Text Editor"}
            }"##,
        )
        .unwrap();

        let result = run(&path, &CancelToken::new()).unwrap();
        let info = result.backup_info.unwrap();

        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.exported_by, "Simple Text Editor");
        assert_eq!(info.tab_names, vec!["a.md", "b.md"]);
        assert_eq!(result.listed_documents.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[1].content, "Valid backup with 2 tabs");
    }

    #[test]
    fn test_inspect_rejects_wrong_extension() {
        let err = run(Path::new("notes.txt"), &CancelToken::new()).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }
}
