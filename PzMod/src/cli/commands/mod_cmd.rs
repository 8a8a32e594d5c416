//! CLI commands for mod utilities

use std::path::{Path, PathBuf};
use std::time::Instant;

use console::style;
use indicatif::ProgressBar;

use crate::Error;
use crate::cli::progress::{
    DISK, LOOKING_GLASS, PACKAGE, bar_style, format_size, print_done, print_step, update_bar,
};
use crate::formats::mod_info::{MOD_INFO_FILE, ModInfo};
use crate::mods::{BuildOptions, ModBuilder, PzModConfig, ValidationIssue, init_mod};

/// Create a new mod skeleton
pub fn init(
    path: &Path,
    name: &str,
    id: Option<&str>,
    description: &str,
    authors: &str,
    version: &str,
) -> anyhow::Result<()> {
    let id = id.map_or_else(|| name.replace(' ', ""), str::to_string);

    let mut mod_info = ModInfo::new(name, id);
    mod_info.description = description.to_string();
    mod_info.authors = authors.to_string();
    mod_info.version = version.to_string();

    if let Some(issue) = mod_info.validate_fields().iter().find(|i| i.is_error()) {
        eprintln!("{} {}", style("Error:").red().bold(), issue.message);
        std::process::exit(1);
    }

    init_mod(path, &mod_info)?;

    println!("Initialized mod at {}", path.display());
    println!("  ID:   {}", mod_info.id);
    println!("  Name: {}", mod_info.name);
    println!("Add a poster.png before building.");
    Ok(())
}

/// Validate a mod directory, exiting with status 1 on errors
pub fn validate(path: &Path) -> anyhow::Result<()> {
    let config = PzModConfig::load(path).unwrap_or_else(|e| {
        eprintln!("{} {e}", style("Warning:").yellow().bold());
        PzModConfig::default()
    });
    let mut builder = ModBuilder::new(path).with_settings(config.validation);

    print_step(1, 1, LOOKING_GLASS, "Validating mod...");
    let issues = builder.validate().to_vec();
    print_issues(&issues);

    if issues.iter().any(ValidationIssue::is_error) {
        println!("\nValidation: {}", style("FAILED").red().bold());
        std::process::exit(1);
    }

    println!("\nValidation: {}", style("PASSED").green().bold());
    if let Ok(mod_info) = builder.mod_info() {
        println!("  Name:       {}", mod_info.name);
        println!("  ID:         {}", mod_info.id);
        println!("  Version:    {}", mod_info.version);
        println!("  PZ Version: {}", mod_info.pzversion);
    }
    let stats = builder.stats();
    println!("  Files:      {}", stats.file_count);
    println!("  Size:       {}", format_size(stats.total_size));
    Ok(())
}

/// Validate and package a mod
pub fn build(
    path: &Path,
    output: Option<&Path>,
    no_zip: bool,
    skip_validation: bool,
    force: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = PzModConfig::load(path)?;
    let options = BuildOptions {
        output_dir: output.map_or_else(|| PathBuf::from(&config.build.output_dir), Path::to_path_buf),
        as_zip: config.build.zip && !no_zip,
        skip_validation,
        force,
    };
    let mut builder = ModBuilder::new(path).with_settings(config.validation);

    if !quiet {
        let first = if skip_validation {
            "Skipping validation"
        } else {
            "Validating and collecting files..."
        };
        print_step(1, 2, LOOKING_GLASS, first);
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(bar_style());
        pb
    };

    let result = builder.build_with_progress(&options, &|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    match result {
        Ok(output) => {
            if !quiet {
                print_issues(&output.issues);
                let emoji = if options.as_zip { PACKAGE } else { DISK };
                print_step(2, 2, emoji, &format!("Packaged {} files", output.file_count));
                if output.forced {
                    println!(
                        "{} built despite validation errors",
                        style("Warning:").yellow().bold()
                    );
                }
                print_done(started.elapsed());
            }
            println!("Output: {}", output.path.display());
            Ok(())
        }
        Err(Error::ValidationFailed { issues }) => {
            print_issues(&issues);
            eprintln!(
                "\n{} validation errors block the build (use --force to build anyway)",
                style("Build aborted:").red().bold()
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// Display mod.info fields
pub fn info(path: &Path, json: bool) -> anyhow::Result<()> {
    let info_path = path.join(MOD_INFO_FILE);
    let mod_info = match ModInfo::load(&info_path) {
        Ok(info) => info,
        Err(Error::DescriptorNotFound { path: missing }) => {
            eprintln!(
                "{} mod.info not found at {}",
                style("Error:").red().bold(),
                missing.display()
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&mod_info)?);
        return Ok(());
    }

    println!("Mod Information: {}", info_path.display());
    println!();
    for (key, value) in mod_info.fields() {
        if !value.is_empty() {
            println!("  {:12} {value}", style(key).cyan());
        }
    }
    let requirements = mod_info.requirements();
    if !requirements.is_empty() {
        println!("  {:12} {}", style("requires").cyan(), requirements.join(", "));
    }
    for (key, value) in &mod_info.extra {
        println!("  {:12} {value}", style(key).dim());
    }
    Ok(())
}

fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    println!("Issues:");
    for issue in issues {
        let marker = if issue.is_error() {
            style("error").red().bold()
        } else {
            style("warning").yellow()
        };
        match &issue.reference {
            Some(reference) => println!("  - {marker}: {} ({reference})", issue.message),
            None => println!("  - {marker}: {}", issue.message),
        }
    }
}
