//! Reading a backup file.
//!
//! Guards run before any byte is read: the name must end in `.json`, the
//! declared size must be non-zero and at most [`MAX_BACKUP_SIZE`]. The content
//! is then read in chunks, checking the [`CancelToken`] between chunks and
//! enforcing the size ceiling again on the bytes actually seen, decoded to text,
//! parsed as JSON and handed to [`decode`].
//!
//! Text decoding is lenient: a leading UTF-8 BOM is dropped and invalid
//! sequences become U+FFFD. A file holding nothing but a BOM
//! or whitespace is therefore non-empty in bytes yet empty as text, which is why
//! emptiness is checked twice.

use super::validate::{decode, FormatError};
use super::{Backup, MAX_BACKUP_SIZE};
use crate::cancel::CancelToken;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid file type: Please select a JSON backup file")]
    InvalidFileType,

    #[error("File too large: Backup file must be smaller than 10MB")]
    FileTooLarge,

    #[error("Empty file: Please select a valid backup file")]
    EmptyFile,

    #[error("Empty file: The selected file appears to be empty")]
    EmptyText,

    #[error("Invalid JSON format: The file does not contain valid JSON data")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Failed to read file: There was an error reading the selected file")]
    ReadFailed(#[source] io::Error),

    #[error("Reading the backup file was cancelled")]
    Cancelled,

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidFileType => "INVALID_FILE_TYPE",
            ParseError::FileTooLarge => "FILE_TOO_LARGE",
            ParseError::EmptyFile | ParseError::EmptyText => "EMPTY_FILE",
            ParseError::InvalidJson(_) => "INVALID_JSON",
            ParseError::ReadFailed(_) => "READ_FAILED",
            ParseError::Cancelled => "CANCELLED",
            ParseError::Format(err) => err.code(),
        }
    }
}

/// A named, sized byte source, as handed over by a file picker.
pub struct BackupFile<R> {
    name: String,
    size: u64,
    reader: R,
}

impl<R: Read> BackupFile<R> {
    pub fn new(name: impl Into<String>, size: u64, reader: R) -> Self {
        Self {
            name: name.into(),
            size,
            reader,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl BackupFile<Cursor<Vec<u8>>> {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let size = bytes.len() as u64;
        Self::new(name, size, Cursor::new(bytes))
    }
}

impl BackupFile<File> {
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path).map_err(ParseError::ReadFailed)?;
        let size = file.metadata().map_err(ParseError::ReadFailed)?.len();
        Ok(Self::new(name, size, file))
    }
}

/// Parse a backup file at `path`, rejecting wrong extensions before touching the disk.
pub fn parse_backup_path(path: &Path, cancel: &CancelToken) -> Result<Backup, ParseError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if !has_json_extension(&name) {
        return Err(ParseError::InvalidFileType);
    }
    parse_backup_file(BackupFile::open(path)?, cancel)
}

/// Read, decode and validate a backup file.
pub fn parse_backup_file<R: Read>(
    mut file: BackupFile<R>,
    cancel: &CancelToken,
) -> Result<Backup, ParseError> {
    if !has_json_extension(&file.name) {
        return Err(ParseError::InvalidFileType);
    }
    if file.size > MAX_BACKUP_SIZE {
        return Err(ParseError::FileTooLarge);
    }
    if file.size == 0 {
        return Err(ParseError::EmptyFile);
    }

    debug!(name = %file.name, size = file.size, "Reading backup file");
    let bytes = read_bounded(&mut file.reader, cancel)?;
    let text = decode_text(&bytes);

    if text.trim().is_empty() {
        return Err(ParseError::EmptyText);
    }

    let value: serde_json::Value = serde_json::from_str(&text).map_err(ParseError::InvalidJson)?;
    let backup = decode(value)?;
    debug!(
        documents = backup.editors.len(),
        version = %backup.version,
        "Parsed backup file"
    );
    Ok(backup)
}

fn has_json_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".json")
}

fn read_bounded<R: Read>(reader: &mut R, cancel: &CancelToken) -> Result<Vec<u8>, ParseError> {
    let mut bytes = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        if cancel.is_cancelled() {
            return Err(ParseError::Cancelled);
        }
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ParseError::ReadFailed(e)),
        };
        bytes.extend_from_slice(&chunk[..n]);
        if bytes.len() as u64 > MAX_BACKUP_SIZE {
            return Err(ParseError::FileTooLarge);
        }
    }

    Ok(bytes)
}

fn decode_text(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn valid_json() -> String {
        json!({
            "version": "1.0.0",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "editors": [
                { "id": 1, "name": "Test File 1.txt", "content": "This is test content for file 1" },
                { "id": 2, "name": "Test File 2.md", "content": "# Test Markdown\n\nThis is test markdown content." }
            ],
            "metadata": { "totalTabs": 2, "exportedBy": "Simple Text Editor" }
        })
        .to_string()
    }

    fn parse(name: &str, bytes: impl Into<Vec<u8>>) -> Result<Backup, ParseError> {
        parse_backup_file(BackupFile::from_bytes(name, bytes), &CancelToken::new())
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    /// Declares a small size but keeps producing bytes.
    struct EndlessReader;

    impl Read for EndlessReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            buf.fill(b' ');
            Ok(buf.len())
        }
    }

    #[test]
    fn test_parses_valid_file() {
        let backup = parse("backup.json", valid_json()).unwrap();
        assert_eq!(backup.version, "1.0.0");
        assert_eq!(backup.timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!(backup.editors.len(), 2);
        assert_eq!(backup.editors[1].name, "Test File 2.md");
        assert_eq!(backup.metadata.exported_by, "Simple Text Editor");
    }

    #[test]
    fn test_rejects_non_json_extension() {
        let err = parse("x.txt", "test").unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
        assert_eq!(
            err.to_string(),
            "Invalid file type: Please select a JSON backup file"
        );
    }

    #[test]
    fn test_extension_check_precedes_json_parsing() {
        // Valid backup content does not help a wrong extension.
        let err = parse("backup.json.txt", valid_json()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFileType));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(parse("BACKUP.JSON", valid_json()).is_ok());
    }

    #[test]
    fn test_rejects_zero_byte_file() {
        let err = parse("test.json", "").unwrap_err();
        assert_eq!(err.code(), "EMPTY_FILE");
        assert_eq!(
            err.to_string(),
            "Empty file: Please select a valid backup file"
        );
    }

    #[test]
    fn test_rejects_whitespace_only_text() {
        let err = parse("test.json", "  \n\t ").unwrap_err();
        assert!(matches!(err, ParseError::EmptyText));
        assert_eq!(err.code(), "EMPTY_FILE");
    }

    #[test]
    fn test_bom_only_file_is_empty_text() {
        let err = parse("test.json", UTF8_BOM.to_vec()).unwrap_err();
        assert!(matches!(err, ParseError::EmptyText));
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(valid_json().as_bytes());
        assert!(parse("backup.json", bytes).is_ok());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let large = vec![b'x'; 11 * 1024 * 1024];
        let err = parse("test.json", large).unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
        assert_eq!(
            err.to_string(),
            "File too large: Backup file must be smaller than 10MB"
        );
    }

    #[test]
    fn test_exactly_ten_mib_passes_size_guard() {
        let err = parse("test.json", vec![b'x'; MAX_BACKUP_SIZE as usize]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_size_ceiling_enforced_on_bytes_read() {
        let file = BackupFile::new("lying.json", 10, EndlessReader);
        let err = parse_backup_file(file, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, ParseError::FileTooLarge));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse("test.json", "invalid json content").unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");
        assert_eq!(
            err.to_string(),
            "Invalid JSON format: The file does not contain valid JSON data"
        );
    }

    #[test]
    fn test_validation_errors_propagate_unchanged() {
        let err = parse("test.json", r#"{"timestamp": "t", "editors": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Format(FormatError::MissingVersion)
        ));
        assert_eq!(
            err.to_string(),
            "Invalid backup format: Missing version information"
        );
    }

    #[test]
    fn test_read_failure_is_generic() {
        let file = BackupFile::new("backup.json", 100, FailingReader);
        let err = parse_backup_file(file, &CancelToken::new()).unwrap_err();
        assert_eq!(err.code(), "READ_FAILED");
        assert_eq!(
            err.to_string(),
            "Failed to read file: There was an error reading the selected file"
        );
    }

    #[test]
    fn test_cancelled_read() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let file = BackupFile::from_bytes("backup.json", valid_json());
        let err = parse_backup_file(file, &cancel).unwrap_err();
        assert!(matches!(err, ParseError::Cancelled));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let mut bytes = br#"{"version":"1.0.0","timestamp":"t","editors":[{"id":1,"name":"n","content":""#.to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(br#""}]}"#);
        let backup = parse("backup.json", bytes).unwrap();
        assert_eq!(backup.editors[0].content, "\u{FFFD}");
    }

    #[test]
    fn test_parse_backup_path_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(valid_json().as_bytes()).unwrap();

        let backup = parse_backup_path(&path, &CancelToken::new()).unwrap();
        assert_eq!(backup.editors.len(), 2);
    }

    #[test]
    fn test_parse_backup_path_checks_extension_before_opening() {
        let err = parse_backup_path(Path::new("/does/not/exist.txt"), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidFileType));

        let err = parse_backup_path(Path::new("/does/not/exist.json"), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, ParseError::ReadFailed(_)));
    }
}
