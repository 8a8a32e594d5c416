//! Mod utilities - validation and packaging for Project Zomboid b42 mods
//!
//! This module provides tools for working with a mod directory:
//! - Validate structure and `mod.info` contents
//! - Gate builds on validation errors
//! - Package into a reproducible ZIP or a copied directory tree
//! - Create a new mod skeleton

pub mod config;
pub mod manifest;
pub mod package;
pub mod pipeline;
pub mod policy;
pub mod scaffold;
pub mod types;
pub mod validation;

pub use config::{BuildSettings, PzModConfig, ValidationSettings};
pub use manifest::{ManifestEntry, ModStats, collect_manifest};
pub use pipeline::{BuildOptions, BuildOutput, ModBuilder};
pub use policy::{BuildDecision, build_gate};
pub use scaffold::init_mod;
pub use types::{IssueKind, ModPhase, ModProgress, ModProgressCallback, Severity, ValidationIssue};
pub use validation::{ModValidationResult, validate_mod_structure};
