//! Error surface of a package export.

use crate::db::DbError;
use crate::package::PackageError;
use std::fmt;
use thiserror::Error;
use vocadeck_core::EncodeError;

/// Pipeline stage an export failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Setup,
    Schema,
    Configuration,
    Records,
    Package,
}

impl ExportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Schema => "schema creation",
            Self::Configuration => "configuration write",
            Self::Records => "record insertion",
            Self::Package => "packaging",
        }
    }
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export error types. Every variant is fatal for the whole export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("setup failed: {0}")]
    Setup(#[source] std::io::Error),

    #[error("setup failed: cannot open database: {0}")]
    OpenDatabase(#[source] DbError),

    #[error("schema creation failed: {0}")]
    Schema(#[source] DbError),

    #[error("configuration write failed: {0}")]
    Configuration(#[source] DbError),

    #[error("record insertion failed: {0}")]
    Records(#[source] DbError),

    #[error("record insertion failed: {0}")]
    Ids(#[source] EncodeError),

    #[error("packaging failed: {0}")]
    Package(#[from] PackageError),
}

impl ExportError {
    /// Stage the export stopped at.
    pub fn stage(&self) -> ExportStage {
        match self {
            Self::Setup(_) | Self::OpenDatabase(_) => ExportStage::Setup,
            Self::Schema(_) => ExportStage::Schema,
            Self::Configuration(_) => ExportStage::Configuration,
            Self::Records(_) | Self::Ids(_) => ExportStage::Records,
            Self::Package(_) => ExportStage::Package,
        }
    }
}

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite() -> DbError {
        DbError::Sqlite(rusqlite::Error::InvalidQuery)
    }

    #[test]
    fn test_stage_of_each_variant() {
        let io = || std::io::Error::other("boom");
        assert_eq!(ExportError::Setup(io()).stage(), ExportStage::Setup);
        assert_eq!(ExportError::OpenDatabase(sqlite()).stage(), ExportStage::Setup);
        assert_eq!(ExportError::Schema(sqlite()).stage(), ExportStage::Schema);
        assert_eq!(
            ExportError::Configuration(sqlite()).stage(),
            ExportStage::Configuration
        );
        assert_eq!(ExportError::Records(sqlite()).stage(), ExportStage::Records);
        assert_eq!(
            ExportError::Ids(EncodeError::IdOverflow { seed: i64::MAX, items: 1 }).stage(),
            ExportStage::Records
        );
        assert_eq!(
            ExportError::Package(PackageError::Io(io())).stage(),
            ExportStage::Package
        );
    }

    #[test]
    fn test_error_display_records() {
        let error = ExportError::Records(sqlite());
        assert!(error
            .to_string()
            .starts_with("record insertion failed: sqlite error: "));
    }

    #[test]
    fn test_error_display_package() {
        let error = ExportError::Package(PackageError::Io(std::io::Error::other("disk full")));
        assert_eq!(error.to_string(), "packaging failed: io error: disk full");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ExportStage::Configuration.to_string(), "configuration write");
    }
}
