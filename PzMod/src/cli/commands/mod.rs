use clap::Subcommand;
use std::path::PathBuf;

pub mod execute;
pub mod mod_cmd;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new mod skeleton with a mod.info file
    Init {
        /// Mod directory to create
        path: PathBuf,

        /// Mod display name
        #[arg(short, long)]
        name: String,

        /// Mod ID (letters, numbers and underscores; defaults to the name without spaces)
        #[arg(long)]
        id: Option<String>,

        /// Mod description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Mod author(s)
        #[arg(short, long, default_value = "")]
        authors: String,

        /// Mod version
        #[arg(short = 'v', long = "mod-version", default_value = "1.0")]
        version: String,
    },

    /// Validate a mod directory
    Validate {
        /// Mod directory
        path: PathBuf,
    },

    /// Build a mod package
    Build {
        /// Mod directory
        path: PathBuf,

        /// Output directory (default from pzmod.toml, else ./mods_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Copy files into a directory instead of creating a ZIP file
        #[arg(long)]
        no_zip: bool,

        /// Skip validation
        #[arg(long)]
        skip_validation: bool,

        /// Build even when validation reports errors
        #[arg(long)]
        force: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Display mod.info fields
    Info {
        /// Mod directory
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
