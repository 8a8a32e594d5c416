//! Mod structure validation
//!
//! Checks run in a fixed order so repeated runs over an unchanged tree
//! produce identical issue lists:
//!
//! 1. the mod root exists and is a directory (stops on failure)
//! 2. `mod.info` loads (stops on failure), then its fields are checked
//! 3. poster, tile and `media/` content folders are present
//! 4. every entry under `media/` can be enumerated

use std::path::Path;

use walkdir::WalkDir;

use crate::error::Error;
use crate::formats::mod_info::{MOD_INFO_FILE, ModInfo};
use crate::utils::{is_hidden, normalize_path, relative_path};

use super::config::ValidationSettings;
use super::types::{IssueKind, ValidationIssue};

/// Directory holding all game-loaded content
pub const MEDIA_DIR: &str = "media";

/// Extensions the game loads from a b42 mod's media tree
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "lua", "txt", "png", "ogg", "wav", "xml", "json", "fbx", "bin", "tiles", "tmx", "tsx",
];

/// Result of mod structure validation
#[derive(Clone, Debug, Default)]
pub struct ModValidationResult {
    /// The descriptor, if it could be loaded
    pub mod_info: Option<ModInfo>,
    /// All findings, in check order
    pub issues: Vec<ValidationIssue>,
}

impl ModValidationResult {
    /// Whether no error-severity issue was found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }
}

/// Validate a mod directory
///
/// Never fails: a missing root or descriptor is reported as a single
/// [`IssueKind::NotFound`] error and no further checks run.
#[must_use]
pub fn validate_mod_structure(mod_path: &Path, settings: &ValidationSettings) -> ModValidationResult {
    let mut result = ModValidationResult::default();

    if !mod_path.is_dir() {
        result.issues.push(
            ValidationIssue::error(
                IssueKind::NotFound,
                format!("Mod directory not found: {}", mod_path.display()),
            )
            .with_reference(mod_path.display().to_string()),
        );
        return result;
    }

    let mod_info = match ModInfo::load(mod_path.join(MOD_INFO_FILE)) {
        Ok(info) => info,
        Err(err) => {
            let message = match err {
                Error::DescriptorNotFound { .. } => "Missing mod.info file".to_string(),
                other => format!("Could not read mod.info: {other}"),
            };
            result.issues.push(
                ValidationIssue::error(IssueKind::NotFound, message).with_reference(MOD_INFO_FILE),
            );
            return result;
        }
    };
    tracing::debug!("Loaded mod.info for '{}'", mod_info.id);

    result.issues.extend(mod_info.validate_fields());
    result.issues.extend(check_images(mod_path, &mod_info));
    result.issues.extend(check_media_content(mod_path));
    result.issues.extend(scan_media(mod_path, settings));

    result.mod_info = Some(mod_info);
    result
}

/// Poster is required, tile is optional. Present images must decode.
fn check_images(mod_path: &Path, mod_info: &ModInfo) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (label, file, required) in [
        ("Poster", mod_info.poster_file(), true),
        ("Tile", mod_info.tile_file(), false),
    ] {
        let path = mod_path.join(file);
        if !path.is_file() {
            let message = format!("{label} image not found: {file}");
            let issue = if required {
                ValidationIssue::error(IssueKind::MissingAsset, message)
            } else {
                ValidationIssue::warning(IssueKind::MissingAsset, message)
            };
            issues.push(issue.with_reference(file));
            continue;
        }

        if let Err(e) = image::image_dimensions(&path) {
            tracing::debug!("{label} image {} failed to decode: {e}", path.display());
            issues.push(
                ValidationIssue::warning(
                    IssueKind::InvalidImage,
                    format!("Invalid {} image: {file}", label.to_lowercase()),
                )
                .with_reference(file),
            );
        }
    }

    issues
}

/// At most one warning: `media/` missing, or no subfolder holding a file
fn check_media_content(mod_path: &Path) -> Option<ValidationIssue> {
    let media = mod_path.join(MEDIA_DIR);
    if !media.is_dir() {
        return Some(
            ValidationIssue::warning(
                IssueKind::EmptyContent,
                "No media/ directory found - mod has no content",
            )
            .with_reference(MEDIA_DIR),
        );
    }

    let has_content = WalkDir::new(&media)
        .follow_links(true)
        .min_depth(2)
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()))
        .filter_map(std::result::Result::ok)
        .any(|e| e.file_type().is_file());

    if has_content {
        None
    } else {
        Some(
            ValidationIssue::warning(
                IssueKind::EmptyContent,
                "No content folders found under media/ (lua/, scripts/, textures/, ...)",
            )
            .with_reference(MEDIA_DIR),
        )
    }
}

/// Enumerate the media tree. Bad entries become warnings, never errors.
fn scan_media(mod_path: &Path, settings: &ValidationSettings) -> Vec<ValidationIssue> {
    let media = mod_path.join(MEDIA_DIR);
    let mut issues = Vec::new();
    if !media.is_dir() {
        return issues;
    }

    let walker = WalkDir::new(&media)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let reference = e
                    .path()
                    .and_then(|p| relative_path(p, mod_path))
                    .unwrap_or_else(|| MEDIA_DIR.to_string());
                tracing::warn!("Skipping unreadable entry {reference}: {e}");
                issues.push(
                    ValidationIssue::warning(
                        IssueKind::UnreadableEntry,
                        format!("Unreadable entry: {reference}"),
                    )
                    .with_reference(reference),
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let reference = relative_path(entry.path(), mod_path)
            .unwrap_or_else(|| normalize_path(entry.path()));

        if let Err(e) = std::fs::File::open(entry.path()) {
            tracing::warn!("Skipping unreadable file {reference}: {e}");
            issues.push(
                ValidationIssue::warning(
                    IssueKind::UnreadableEntry,
                    format!("Unreadable entry: {reference}"),
                )
                .with_reference(reference),
            );
            continue;
        }

        if settings.check_extensions && !has_known_extension(entry.path()) {
            issues.push(
                ValidationIssue::warning(
                    IssueKind::UnusualExtension,
                    format!("Unusual file extension: {reference}"),
                )
                .with_reference(reference),
            );
        }
    }

    issues
}

/// Files without an extension are not flagged
fn has_known_extension(path: &Path) -> bool {
    path.extension().is_none_or(|ext| {
        let ext = ext.to_string_lossy().to_lowercase();
        KNOWN_EXTENSIONS.contains(&ext.as_str())
    })
}
