//! One-time extraction of the bundled dataset archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DinerecError, Result};

/// What [`ensure_extracted`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The target directory already existed; nothing was read.
    AlreadyPresent,
    /// The archive was unpacked.
    Extracted {
        /// Number of files written.
        files: usize,
    },
}

/// Extracts `archive` into `target` unless `target` already exists.
///
/// Entries are first written to a sibling staging directory which is renamed
/// into place once every entry is on disk, so an interrupted extraction never
/// leaves a partial `target` behind.
///
/// # Errors
///
/// Returns [`DinerecError::MissingFile`] if extraction is needed and the
/// archive does not exist, [`DinerecError::Archive`] for a corrupt archive or
/// an entry with an unsafe path, and [`DinerecError::Io`] for write failures.
pub fn ensure_extracted(archive: &Path, target: &Path) -> Result<ExtractOutcome> {
    if target.exists() {
        debug!(target = %target.display(), "dataset already extracted");
        return Ok(ExtractOutcome::AlreadyPresent);
    }
    if !archive.exists() {
        return Err(DinerecError::MissingFile {
            path: archive.to_path_buf(),
        });
    }

    let staging = staging_dir(target);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| DinerecError::io(&staging, e))?;
    }

    let files = match unpack(archive, &staging) {
        Ok(files) => files,
        Err(e) => {
            // best effort, the original error is what matters
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
    };

    fs::rename(&staging, target).map_err(|e| DinerecError::io(target, e))?;
    info!(
        archive = %archive.display(),
        target = %target.display(),
        files,
        "extracted dataset archive"
    );
    Ok(ExtractOutcome::Extracted { files })
}

fn staging_dir(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

fn unpack(archive_path: &Path, staging: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| DinerecError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_error(archive_path, &e))?;

    fs::create_dir_all(staging).map_err(|e| DinerecError::io(staging, e))?;

    let mut files = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| archive_error(archive_path, &e))?;
        let relative = entry.enclosed_name().ok_or_else(|| DinerecError::Archive {
            path: archive_path.to_path_buf(),
            message: format!("unsafe entry path '{}'", entry.name()),
        })?;
        let out_path = staging.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| DinerecError::io(&out_path, e))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| DinerecError::io(parent, e))?;
        }
        let mut out = File::create(&out_path).map_err(|e| DinerecError::io(&out_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| DinerecError::io(&out_path, e))?;
        files += 1;
    }
    Ok(files)
}

fn archive_error(path: &Path, err: &zip::result::ZipError) -> DinerecError {
    DinerecError::Archive {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
