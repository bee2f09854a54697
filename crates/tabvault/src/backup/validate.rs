//! Backup schema validation.
//!
//! Checks run in a fixed order and stop at the first failure, so the same bad
//! file always yields the same message:
//!
//! 1. root is an object
//! 2. `version` is present (truthy)
//! 3. `timestamp` is present (truthy)
//! 4. `editors` is an array
//! 5. per editor, at 1-based position: object, integral `id`, string `name`,
//!    string `content`
//!
//! "Present" means truthy: absent, `null`, `false`, `0` and `""` all count as
//! missing. An array passes the object checks but has no keys, so a top-level
//! array fails on `version` and an array editor fails on `id`.

use super::{Backup, BackupMetadata};
use crate::model::{Attributes, Document, DocumentId};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid file format: File must contain valid JSON data")]
    NotAnObject,

    #[error("Invalid backup format: Missing version information")]
    MissingVersion,

    #[error("Invalid backup format: Missing timestamp information")]
    MissingTimestamp,

    #[error("Invalid backup format: Missing or invalid editors data")]
    InvalidEditors,

    #[error("Invalid editor data at position {position}: Editor must be an object")]
    EditorNotObject { position: usize },

    #[error("Invalid editor data at position {position}: Missing or invalid ID")]
    InvalidId { position: usize },

    #[error("Invalid editor data at position {position}: Missing or invalid name")]
    InvalidName { position: usize },

    #[error("Invalid editor data at position {position}: Missing or invalid content")]
    InvalidContent { position: usize },
}

impl FormatError {
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::NotAnObject
            | FormatError::MissingVersion
            | FormatError::MissingTimestamp
            | FormatError::InvalidEditors => "INVALID_FORMAT",
            _ => "INVALID_EDITOR",
        }
    }

    /// The offending field.
    pub fn field(&self) -> &'static str {
        match self {
            FormatError::NotAnObject => "root",
            FormatError::MissingVersion => "version",
            FormatError::MissingTimestamp => "timestamp",
            FormatError::InvalidEditors => "editors",
            FormatError::EditorNotObject { .. } => "editor",
            FormatError::InvalidId { .. } => "id",
            FormatError::InvalidName { .. } => "name",
            FormatError::InvalidContent { .. } => "content",
        }
    }

    /// 1-based position of the offending editor entry, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            FormatError::EditorNotObject { position }
            | FormatError::InvalidId { position }
            | FormatError::InvalidName { position }
            | FormatError::InvalidContent { position } => Some(*position),
            _ => None,
        }
    }
}

/// Check `candidate` against the backup schema without consuming it.
pub fn validate(candidate: &Value) -> Result<(), FormatError> {
    let editors = check_envelope(candidate)?;
    for (i, editor) in editors.iter().enumerate() {
        check_editor(editor, i + 1)?;
    }
    Ok(())
}

/// Validate and convert untrusted JSON into a typed [`Backup`].
///
/// Editor ids are kept as found; the importer strips them. Unknown editor keys
/// become [`Attributes`]. A missing or malformed `metadata` block is replaced by
/// defaults since it is never validated.
pub fn decode(candidate: Value) -> Result<Backup, FormatError> {
    validate(&candidate)?;

    let Value::Object(mut root) = candidate else {
        return Err(FormatError::NotAnObject);
    };

    let version = into_text(root.remove("version"));
    let timestamp = into_text(root.remove("timestamp"));
    let Some(Value::Array(items)) = root.remove("editors") else {
        return Err(FormatError::InvalidEditors);
    };

    let editors = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| decode_editor(item, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let metadata = decode_metadata(root.remove("metadata"), editors.len());

    Ok(Backup {
        version,
        timestamp,
        editors,
        metadata,
    })
}

fn check_envelope(candidate: &Value) -> Result<&Vec<Value>, FormatError> {
    let root = match candidate {
        Value::Object(root) => root,
        Value::Array(_) => return Err(FormatError::MissingVersion),
        _ => return Err(FormatError::NotAnObject),
    };

    if !is_truthy(root.get("version")) {
        return Err(FormatError::MissingVersion);
    }
    if !is_truthy(root.get("timestamp")) {
        return Err(FormatError::MissingTimestamp);
    }

    root.get("editors")
        .and_then(Value::as_array)
        .ok_or(FormatError::InvalidEditors)
}

fn check_editor(editor: &Value, position: usize) -> Result<(), FormatError> {
    let fields = match editor {
        Value::Object(fields) => fields,
        Value::Array(_) => return Err(FormatError::InvalidId { position }),
        _ => return Err(FormatError::EditorNotObject { position }),
    };

    if fields.get("id").and_then(integral_id).is_none() {
        return Err(FormatError::InvalidId { position });
    }
    if !matches!(fields.get("name"), Some(Value::String(_))) {
        return Err(FormatError::InvalidName { position });
    }
    if !matches!(fields.get("content"), Some(Value::String(_))) {
        return Err(FormatError::InvalidContent { position });
    }
    Ok(())
}

fn decode_editor(item: Value, position: usize) -> Result<Document, FormatError> {
    let Value::Object(mut fields) = item else {
        return Err(FormatError::EditorNotObject { position });
    };

    let id = fields
        .remove("id")
        .as_ref()
        .and_then(integral_id)
        .ok_or(FormatError::InvalidId { position })?;
    let Some(Value::String(name)) = fields.remove("name") else {
        return Err(FormatError::InvalidName { position });
    };
    let Some(Value::String(content)) = fields.remove("content") else {
        return Err(FormatError::InvalidContent { position });
    };

    Ok(Document {
        id,
        name,
        content,
        attributes: Attributes::from_map(fields),
    })
}

fn decode_metadata(raw: Option<Value>, editor_count: usize) -> BackupMetadata {
    let fields = match raw {
        Some(Value::Object(fields)) => fields,
        _ => Map::new(),
    };

    BackupMetadata {
        total_tabs: fields
            .get("totalTabs")
            .and_then(Value::as_u64)
            .unwrap_or(editor_count as u64),
        exported_by: fields
            .get("exportedBy")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Any JSON number with an integral value that fits in an id (`3`, `3.0`).
fn integral_id(value: &Value) -> Option<DocumentId> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= DocumentId::MIN as f64 && f < DocumentId::MAX as f64 {
        Some(f as DocumentId)
    } else {
        None
    }
}

fn into_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
