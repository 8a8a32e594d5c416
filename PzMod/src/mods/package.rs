//! Package writers: ZIP archive or plain directory copy

use std::fs::File;
use std::io::{BufReader, Seek, Write};
use std::path::{Component, Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};

use super::manifest::ManifestEntry;
use super::types::{ModPhase, ModProgress, ModProgressCallback};
use super::validation::MEDIA_DIR;

/// Write `entries` to a ZIP archive at `zip_path`, replacing any existing file.
///
/// The archive is written to a temporary file next to `zip_path` and only
/// moved into place once complete. Entries get a fixed timestamp and mode so
/// the same inputs always produce the same bytes.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if an entry path is not relative and
/// plain, [`Error::OutputCollision`] if `zip_path` is a directory, or an IO
/// or ZIP error if writing fails.
pub fn write_zip(
    entries: &[ManifestEntry],
    zip_path: &Path,
    progress: ModProgressCallback,
) -> Result<()> {
    check_entry_paths(entries)?;
    if zip_path.is_dir() {
        return Err(Error::OutputCollision {
            path: zip_path.to_path_buf(),
        });
    }
    let parent = zip_path
        .parent()
        .ok_or_else(|| Error::InvalidPath(zip_path.display().to_string()))?;

    let temp = tempfile::Builder::new()
        .prefix(".pzmod-")
        .suffix(".zip.partial")
        .tempfile_in(parent)?;

    let temp = write_archive(entries, temp, progress)?;
    temp.persist(zip_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote {} entries to {}", entries.len(), zip_path.display());
    Ok(())
}

fn write_archive<W: Write + Seek>(
    entries: &[ManifestEntry],
    writer: W,
    progress: ModProgressCallback,
) -> Result<W> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(writer);
    let total = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        progress(&ModProgress::with_file(
            ModPhase::Packaging,
            index + 1,
            total,
            &entry.relative,
        ));
        zip.start_file(entry.relative.as_str(), options)?;
        let mut reader = BufReader::new(File::open(&entry.source)?);
        std::io::copy(&mut reader, &mut zip)?;
    }

    Ok(zip.finish()?)
}

/// Copy `entries` from the mod at `source_root` into `dest_dir`, replacing
/// any existing directory there.
///
/// Nothing is removed unless every entry path is plain and `dest_dir` lies
/// outside the source mod.
///
/// # Errors
/// Returns [`Error::InvalidPath`] for an entry path that is absolute or
/// climbs with `..`, [`Error::OutputCollision`] if `dest_dir` is an existing
/// file or overlaps the source mod, or an IO error if copying fails.
pub fn copy_tree(
    entries: &[ManifestEntry],
    source_root: &Path,
    dest_dir: &Path,
    progress: ModProgressCallback,
) -> Result<()> {
    check_entry_paths(entries)?;
    check_destination(source_root, dest_dir)?;

    if dest_dir.exists() || dest_dir.is_symlink() {
        if !dest_dir.is_dir() || dest_dir.is_symlink() {
            return Err(Error::OutputCollision {
                path: dest_dir.to_path_buf(),
            });
        }
        tracing::debug!("Removing previous output {}", dest_dir.display());
        std::fs::remove_dir_all(dest_dir)?;
    }
    std::fs::create_dir_all(dest_dir)?;

    let total = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        progress(&ModProgress::with_file(
            ModPhase::Packaging,
            index + 1,
            total,
            &entry.relative,
        ));
        let target = dest_dir.join(&entry.relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&entry.source, &target)?;
    }

    tracing::info!("Copied {} files to {}", entries.len(), dest_dir.display());
    Ok(())
}

/// Every entry must be a non-empty path of plain components
fn check_entry_paths(entries: &[ManifestEntry]) -> Result<()> {
    for entry in entries {
        let path = Path::new(&entry.relative);
        let plain = path.components().next().is_some()
            && path.components().all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(Error::InvalidPath(entry.relative.clone()));
        }
    }
    Ok(())
}

/// `dest_dir` must not be the mod root, one of its ancestors, or inside its
/// media tree
fn check_destination(source_root: &Path, dest_dir: &Path) -> Result<()> {
    let root = source_root.canonicalize()?;
    let dest = resolve(dest_dir)?;
    if dest == root || root.starts_with(&dest) || dest.starts_with(root.join(MEDIA_DIR)) {
        return Err(Error::OutputCollision {
            path: dest_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            Ok(resolve(parent)?.join(name))
        }
        _ => Ok(std::path::absolute(path)?),
    }
}
