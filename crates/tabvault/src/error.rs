use crate::backup::import::ImportSummary;
use crate::backup::parse::ParseError;
use crate::backup::validate::FormatError;
use crate::model::DocumentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabvaultError {
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to export backup data")]
    ExportFailed {
        #[source]
        source: Box<TabvaultError>,
    },

    #[error("Failed to import backup data")]
    ImportFailed {
        #[source]
        source: Box<TabvaultError>,
    },

    #[error("Import cancelled ({summary})")]
    ImportCancelled { summary: ImportSummary },

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<FormatError> for TabvaultError {
    fn from(err: FormatError) -> Self {
        TabvaultError::Parse(ParseError::Format(err))
    }
}

impl TabvaultError {
    pub(crate) fn export_failed(source: TabvaultError) -> Self {
        TabvaultError::ExportFailed {
            source: Box::new(source),
        }
    }

    pub(crate) fn import_failed(source: TabvaultError) -> Self {
        TabvaultError::ImportFailed {
            source: Box::new(source),
        }
    }

    /// Stable machine-readable code, e.g. `INVALID_JSON` or `EXPORT_FAILED`.
    pub fn code(&self) -> &'static str {
        match self {
            TabvaultError::DocumentNotFound(_) => "NOT_FOUND",
            TabvaultError::Io(_) => "IO",
            TabvaultError::Serialization(_) => "SERIALIZATION",
            TabvaultError::Store(_) => "STORE",
            TabvaultError::Parse(err) => err.code(),
            TabvaultError::ExportFailed { .. } => "EXPORT_FAILED",
            TabvaultError::ImportFailed { .. } => "IMPORT_FAILED",
            TabvaultError::ImportCancelled { .. } => "CANCELLED",
            TabvaultError::InvalidPattern(_) => "INVALID_PATTERN",
            TabvaultError::Config(_) => "CONFIG",
            TabvaultError::Api(_) => "API",
        }
    }
}

pub type Result<T> = std::result::Result<T, TabvaultError>;
