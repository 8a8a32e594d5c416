//! # pzmod
//!
//! A pure-Rust library for building Project Zomboid (b42) mods.
//!
//! ## What it does
//!
//! - **mod.info** - Parse, edit and write the mod descriptor, keeping unknown
//!   keys intact
//! - **Validation** - Check a mod directory against the b42 layout and report
//!   errors and warnings
//! - **Packaging** - Build a reproducible ZIP archive or a copied directory
//!
//! ## Quick Start
//!
//! ### Validating and Building a Mod
//!
//! ```no_run
//! use pzmod::mods::{BuildOptions, ModBuilder};
//!
//! let mut builder = ModBuilder::new("my_mod");
//! for issue in builder.validate() {
//!     println!("{issue}");
//! }
//!
//! let output = builder.build(&BuildOptions::new("mods_output"))?;
//! println!("Wrote {}", output.path.display());
//! # Ok::<(), pzmod::Error>(())
//! ```
//!
//! ### Editing mod.info
//!
//! ```
//! use pzmod::formats::ModInfo;
//!
//! let mut info = ModInfo::parse("name=My Mod\nid=MyMod\nworkshopid=42\n");
//! info.authors = "Me".to_string();
//! assert!(info.serialize().ends_with("workshopid=42\n"));
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `pzmod` command-line binary

pub mod error;
pub mod formats;
pub mod mods;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{MOD_INFO_FILE, ModInfo};
    pub use crate::mods::{
        BuildDecision, BuildOptions, BuildOutput, IssueKind, ModBuilder, ModStats,
        ModValidationResult, PzModConfig, Severity, ValidationIssue, build_gate, init_mod,
        validate_mod_structure,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
