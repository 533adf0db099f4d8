//! Zip archive read and write
//!
//! The layer archive is a plain zip: every file under the skeleton root
//! is stored deflate-compressed under its path relative to that root.
//! Directories are implied by entry paths, so empty directories do not
//! survive a round trip.

use crate::error::{StrataError, StrataResult};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Extract a zip archive into a directory.
///
/// Existing files at colliding paths are overwritten.
pub fn unzip(archive_path: &Path, dest: &Path) -> StrataResult<()> {
    info!("Extracting {} to {}", archive_path.display(), dest.display());

    let file = File::open(archive_path)
        .map_err(|e| StrataError::io(format!("opening {}", archive_path.display()), e))?;

    let mut archive = ZipArchive::new(file).map_err(|e| StrataError::Extract {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    archive.extract(dest).map_err(|e| StrataError::Extract {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Zip a directory tree into a single archive file.
///
/// Entry names are relative to `dir`; only regular files are written.
pub fn zip_directory(dir: &Path, archive_path: &Path) -> StrataResult<()> {
    info!("Archiving {} to {}", dir.display(), archive_path.display());

    let file = File::create(archive_path)
        .map_err(|e| StrataError::io(format!("creating {}", archive_path.display()), e))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir) {
        let entry = entry
            .map_err(|e| StrataError::io(format!("walking {}", dir.display()), e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| StrataError::io("resolving archive entry path", io::Error::other(e)))?;

        zip.start_file(relative.to_string_lossy(), options)
            .map_err(|e| zip_write_error(archive_path, e))?;

        let mut source = File::open(entry.path())
            .map_err(|e| StrataError::io(format!("opening {}", entry.path().display()), e))?;
        io::copy(&mut source, &mut zip)
            .map_err(|e| StrataError::io(format!("compressing {}", entry.path().display()), e))?;
    }

    zip.finish()
        .map_err(|e| zip_write_error(archive_path, e))?;
    Ok(())
}

fn zip_write_error(archive_path: &Path, source: zip::result::ZipError) -> StrataError {
    StrataError::io(
        format!("writing archive {}", archive_path.display()),
        io::Error::other(source),
    )
}
