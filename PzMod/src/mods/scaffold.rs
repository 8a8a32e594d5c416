//! New mod skeleton creation

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::mod_info::{MOD_INFO_FILE, ModInfo};

/// Directories created under a new mod root
pub const SKELETON_DIRS: &[&str] = &[
    "media/lua/client",
    "media/lua/server",
    "media/lua/shared",
    "media/scripts",
    "media/textures",
];

/// Create the b42 directory layout and write `mod.info`.
///
/// The poster image is not created; validation will report it until the
/// author adds one.
///
/// # Errors
/// Returns [`Error::AlreadyInitialized`] if `mod_path` already has a
/// `mod.info`, or an IO error if the layout cannot be created.
pub fn init_mod(mod_path: &Path, mod_info: &ModInfo) -> Result<PathBuf> {
    let info_path = mod_path.join(MOD_INFO_FILE);
    if info_path.exists() {
        return Err(Error::AlreadyInitialized { path: info_path });
    }

    for dir in SKELETON_DIRS {
        std::fs::create_dir_all(mod_path.join(dir))?;
    }
    mod_info.save(&info_path)?;

    tracing::info!("Initialized mod '{}' at {}", mod_info.id, mod_path.display());
    Ok(info_path)
}
