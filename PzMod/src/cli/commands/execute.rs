//! Command execution implementations

use super::Commands;
use super::mod_cmd;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Init {
                path,
                name,
                id,
                description,
                authors,
                version,
            } => mod_cmd::init(path, name, id.as_deref(), description, authors, version),
            Commands::Validate { path } => mod_cmd::validate(path),
            Commands::Build {
                path,
                output,
                no_zip,
                skip_validation,
                force,
                quiet,
            } => mod_cmd::build(
                path,
                output.as_deref(),
                *no_zip,
                *skip_validation,
                *force,
                *quiet,
            ),
            Commands::Info { path, json } => mod_cmd::info(path, *json),
        }
    }
}
