//! Deterministic file manifest for packaging
//!
//! Archive entry order must not depend on the platform's directory listing
//! order, so media files are sorted by their `/`-separated relative path.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::formats::mod_info::{MOD_INFO_FILE, ModInfo, is_contained_path};
use crate::utils::{is_hidden, relative_path};

use super::validation::MEDIA_DIR;

/// One file selected for packaging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path inside the package, `/`-separated
    pub relative: String,
    /// Path on disk
    pub source: PathBuf,
}

/// File count and total size of a mod directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModStats {
    pub file_count: usize,
    pub total_size: u64,
}

/// Collect the files to package, in packaging order:
/// `mod.info`, poster and tile (when present and inside the mod root), then
/// the media tree sorted.
///
/// # Errors
/// Returns an error if the media tree cannot be walked at all.
pub fn collect_manifest(mod_path: &Path, mod_info: &ModInfo) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for file in [MOD_INFO_FILE, mod_info.poster_file(), mod_info.tile_file()] {
        let relative = file.trim_start_matches("./").replace('\\', "/");
        if !is_contained_path(&relative) {
            tracing::warn!("Not packaging {file}: path leaves the mod root");
            continue;
        }
        let source = mod_path.join(&relative);
        if source.is_file() && seen.insert(relative.clone()) {
            entries.push(ManifestEntry { relative, source });
        }
    }

    let media = mod_path.join(MEDIA_DIR);
    if media.is_dir() {
        let mut media_entries = walk_files(mod_path, &media);
        media_entries.sort_by(|a, b| a.relative.cmp(&b.relative));
        for entry in media_entries {
            if seen.insert(entry.relative.clone()) {
                entries.push(entry);
            }
        }
    }

    tracing::debug!("Collected {} manifest entries", entries.len());
    Ok(entries)
}

/// Sorted relative paths of every non-hidden file under the mod root
#[must_use]
pub fn list_files(mod_path: &Path) -> Vec<String> {
    let mut files: Vec<String> = walk_files(mod_path, mod_path)
        .into_iter()
        .map(|entry| entry.relative)
        .collect();
    files.sort();
    files
}

/// Count and size every non-hidden file under the mod root
#[must_use]
pub fn mod_stats(mod_path: &Path) -> ModStats {
    walk_files(mod_path, mod_path)
        .iter()
        .filter_map(|entry| std::fs::metadata(&entry.source).ok())
        .fold(ModStats::default(), |stats, meta| ModStats {
            file_count: stats.file_count + 1,
            total_size: stats.total_size + meta.len(),
        })
}

fn walk_files(mod_path: &Path, dir: &Path) -> Vec<ManifestEntry> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let relative = relative_path(e.path(), mod_path)?;
            Some(ManifestEntry {
                relative,
                source: e.into_path(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn relatives(entries: &[ManifestEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative.as_str()).collect()
    }

    #[test]
    fn test_manifest_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(MOD_INFO_FILE), "id=X\n").unwrap();
        fs::write(root.join("poster.png"), "p").unwrap();
        fs::create_dir_all(root.join("media/scripts")).unwrap();
        fs::create_dir_all(root.join("media/lua/shared")).unwrap();
        fs::create_dir_all(root.join("media/.git")).unwrap();
        fs::write(root.join("media/scripts/z.txt"), "z").unwrap();
        fs::write(root.join("media/lua/shared/b.lua"), "b").unwrap();
        fs::write(root.join("media/lua/shared/a.lua"), "a").unwrap();
        fs::write(root.join("media/.git/HEAD"), "ref").unwrap();
        fs::write(root.join("media/.DS_Store"), "").unwrap();
        fs::write(root.join("notes.md"), "not packaged").unwrap();

        let info = ModInfo::parse("id=X\n");
        let entries = collect_manifest(root, &info).unwrap();
        assert_eq!(
            relatives(&entries),
            vec![
                "mod.info",
                "poster.png",
                "media/lua/shared/a.lua",
                "media/lua/shared/b.lua",
                "media/scripts/z.txt",
            ]
        );
    }

    #[test]
    fn test_manifest_does_not_repeat_media_poster() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(MOD_INFO_FILE), "id=X\nposter=media/ui/poster.png\n").unwrap();
        fs::create_dir_all(root.join("media/ui")).unwrap();
        fs::write(root.join("media/ui/poster.png"), "p").unwrap();

        let info = ModInfo::load(root.join(MOD_INFO_FILE)).unwrap();
        let entries = collect_manifest(root, &info).unwrap();
        assert_eq!(relatives(&entries), vec!["mod.info", "media/ui/poster.png"]);
    }

    #[test]
    fn test_manifest_skips_images_outside_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("mod");
        fs::create_dir_all(&root).unwrap();
        fs::write(temp.path().join("secret.txt"), "outside").unwrap();
        let art = temp.path().join("art.png");
        fs::write(&art, "art").unwrap();
        fs::write(root.join(MOD_INFO_FILE), "id=X\n").unwrap();

        let mut info = ModInfo::parse("id=X\n");
        info.poster = art.display().to_string();
        info.tile = "../secret.txt".to_string();
        let entries = collect_manifest(&root, &info).unwrap();
        assert_eq!(relatives(&entries), vec!["mod.info"]);

        info.tile = "..\\secret.txt".to_string();
        let entries = collect_manifest(&root, &info).unwrap();
        assert_eq!(relatives(&entries), vec!["mod.info"]);
    }

    #[test]
    fn test_list_files_and_stats() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(MOD_INFO_FILE), "id=X\n").unwrap();
        fs::create_dir_all(root.join("media/lua")).unwrap();
        fs::write(root.join("media/lua/a.lua"), "12345").unwrap();

        assert_eq!(list_files(root), vec!["media/lua/a.lua", "mod.info"]);
        assert_eq!(
            mod_stats(root),
            ModStats {
                file_count: 2,
                total_size: 10,
            }
        );
    }
}
