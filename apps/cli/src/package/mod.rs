//! `.apkg` archive writer.
//!
//! A package is a ZIP file with two entries: the collection database and the
//! media manifest mapping archive names to original filenames.

use std::io::Write;
use std::path::Path;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive entry holding the collection database.
pub const COLLECTION_ENTRY: &str = "collection.anki2";

/// Archive entry holding the media manifest.
pub const MEDIA_ENTRY: &str = "media";

/// Manifest for a package without media files.
pub const EMPTY_MEDIA_MANIFEST: &[u8] = b"{}";

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to move package into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Write a package containing `collection` to `output`.
///
/// The archive is assembled in a temporary file next to `output` and renamed
/// over it once complete, so `output` never holds a partial archive.
pub fn write_package(output: &Path, collection: &[u8]) -> Result<(), PackageError> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".vocadeck-").suffix(".apkg.tmp");
    // Same mode as a newly created file (0666 less the umask), not 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let file = builder.tempfile_in(dir)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(COLLECTION_ENTRY, options)?;
    zip.write_all(collection)?;

    zip.start_file(MEDIA_ENTRY, options)?;
    zip.write_all(EMPTY_MEDIA_MANIFEST)?;

    let file = zip.finish()?;
    file.as_file().sync_all()?;
    file.persist(output)?;

    tracing::debug!("Wrote package {} ({} byte collection)", output.display(), collection.len());
    Ok(())
}
