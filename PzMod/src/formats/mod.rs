//! File format handlers for Project Zomboid mod files

pub mod mod_info;

pub use mod_info::{MOD_INFO_FILE, ModInfo};
