//! Mod build pipeline: validation gate plus packaging for one mod directory

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::mod_info::{MOD_INFO_FILE, ModInfo, is_safe_id};
use crate::utils::to_safe_name;

use super::config::ValidationSettings;
use super::manifest::{self, ModStats};
use super::package;
use super::policy::{BuildDecision, build_gate};
use super::types::{ModPhase, ModProgress, ModProgressCallback, ValidationIssue};
use super::validation::validate_mod_structure;

/// Packaging options for [`ModBuilder::build`]
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory receiving `<id>.zip` or `<id>/`
    pub output_dir: PathBuf,
    /// Write a ZIP archive instead of copying a directory tree
    pub as_zip: bool,
    /// Package without running validation first
    pub skip_validation: bool,
    /// Package even when validation reports errors
    pub force: bool,
}

impl BuildOptions {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            as_zip: true,
            skip_validation: false,
            force: false,
        }
    }
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The written archive or directory
    pub path: PathBuf,
    /// Issues the build decision was based on (empty when validation was skipped)
    pub issues: Vec<ValidationIssue>,
    /// Whether errors were present and overridden with `force`
    pub forced: bool,
    /// Number of files packaged
    pub file_count: usize,
}

/// Validates and packages a single mod directory.
///
/// The builder owns the loaded `mod.info` and the issues of the most recent
/// validation run. It holds no locks: two builders must not package the
/// same directory at the same time.
#[derive(Debug)]
pub struct ModBuilder {
    mod_path: PathBuf,
    mod_info: Option<ModInfo>,
    issues: Vec<ValidationIssue>,
    settings: ValidationSettings,
}

impl ModBuilder {
    /// Bind a builder to a mod directory. Performs no IO.
    pub fn new(mod_path: impl Into<PathBuf>) -> Self {
        Self {
            mod_path: mod_path.into(),
            mod_info: None,
            issues: Vec::new(),
            settings: ValidationSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ValidationSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn mod_path(&self) -> &Path {
        &self.mod_path
    }

    /// Path of the bound mod's descriptor
    #[must_use]
    pub fn mod_info_path(&self) -> PathBuf {
        self.mod_path.join(MOD_INFO_FILE)
    }

    /// The descriptor, loaded from disk on first access
    ///
    /// # Errors
    /// Returns [`Error::ModDirectoryNotFound`] or [`Error::DescriptorNotFound`]
    /// when the mod root or `mod.info` is missing.
    pub fn mod_info(&mut self) -> Result<&ModInfo> {
        Ok(&*self.mod_info_mut()?)
    }

    /// Mutable access to the descriptor, loading it first if needed
    ///
    /// # Errors
    /// Same as [`mod_info`](Self::mod_info).
    pub fn mod_info_mut(&mut self) -> Result<&mut ModInfo> {
        if self.mod_info.is_none() {
            if !self.mod_path.is_dir() {
                return Err(Error::ModDirectoryNotFound {
                    path: self.mod_path.clone(),
                });
            }
            self.mod_info = Some(ModInfo::load(self.mod_info_path())?);
        }
        self.mod_info
            .as_mut()
            .ok_or_else(|| Error::DescriptorNotFound {
                path: self.mod_path.join(MOD_INFO_FILE),
            })
    }

    /// Issues found by the most recent [`validate`](Self::validate) run
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Validate the mod directory.
    ///
    /// Replaces the previous issue list and re-reads `mod.info` from disk,
    /// so the result always reflects the current filesystem state. Unsaved
    /// changes made through [`mod_info_mut`](Self::mod_info_mut) are dropped.
    pub fn validate(&mut self) -> &[ValidationIssue] {
        tracing::info!("Validating mod at {}", self.mod_path.display());
        let result = validate_mod_structure(&self.mod_path, &self.settings);
        self.mod_info = result.mod_info;
        self.issues = result.issues;
        tracing::debug!("Validation found {} issue(s)", self.issues.len());
        &self.issues
    }

    /// Validate (unless skipped) and package the mod.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] without writing anything when
    /// validation finds errors and `force` is not set; otherwise any IO, ZIP
    /// or missing-descriptor error encountered while packaging.
    pub fn build(&mut self, options: &BuildOptions) -> Result<BuildOutput> {
        self.build_with_progress(options, &|_| {})
    }

    /// [`build`](Self::build) with a progress callback
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn build_with_progress(
        &mut self,
        options: &BuildOptions,
        progress: ModProgressCallback,
    ) -> Result<BuildOutput> {
        let mut issues = Vec::new();
        let mut forced = false;

        if !options.skip_validation {
            progress(&ModProgress::new(ModPhase::Validating, 0, 1));
            issues = self.validate().to_vec();
            match build_gate(&issues, options.force) {
                BuildDecision::Proceed => {}
                BuildDecision::ProceedForced => {
                    tracing::warn!("Building despite validation errors (forced)");
                    forced = true;
                }
                BuildDecision::Abort => {
                    tracing::info!("Build blocked by validation errors");
                    return Err(Error::ValidationFailed { issues });
                }
            }
        }

        progress(&ModProgress::new(ModPhase::Collecting, 0, 1));
        let mod_path = self.mod_path.clone();
        let mod_info = self.mod_info()?;
        let entries = manifest::collect_manifest(&mod_path, mod_info)?;
        let name = output_name(mod_info, &mod_path);

        std::fs::create_dir_all(&options.output_dir)?;
        let path = if options.as_zip {
            let zip_path = options.output_dir.join(format!("{name}.zip"));
            package::write_zip(&entries, &zip_path, progress)?;
            zip_path
        } else {
            let dest = options.output_dir.join(&name);
            package::copy_tree(&entries, &mod_path, &dest, progress)?;
            dest
        };

        progress(&ModProgress::new(ModPhase::Complete, 1, 1));
        tracing::info!("Built {}", path.display());

        Ok(BuildOutput {
            path,
            issues,
            forced,
            file_count: entries.len(),
        })
    }

    /// Sorted relative paths of every file in the mod directory
    #[must_use]
    pub fn file_list(&self) -> Vec<String> {
        manifest::list_files(&self.mod_path)
    }

    /// File count and total size of the mod directory
    #[must_use]
    pub fn stats(&self) -> ModStats {
        manifest::mod_stats(&self.mod_path)
    }
}

/// Name of the build output: the id when it is a safe token, otherwise a
/// sanitized id or directory name.
fn output_name(mod_info: &ModInfo, mod_path: &Path) -> String {
    if is_safe_id(&mod_info.id) {
        return mod_info.id.clone();
    }
    let from_id = to_safe_name(&mod_info.id);
    if !from_id.is_empty() {
        return from_id;
    }
    let from_dir = mod_path
        .file_name()
        .map(|name| to_safe_name(&name.to_string_lossy()))
        .unwrap_or_default();
    if from_dir.is_empty() {
        "mod".to_string()
    } else {
        from_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::IssueKind;
    use std::fs;
    use tempfile::TempDir;

    fn minimal_mod(root: &Path, id: &str) {
        fs::create_dir_all(root).unwrap();
        fs::write(root.join(MOD_INFO_FILE), format!("name=Test\nid={id}\n")).unwrap();
        image::RgbImage::new(2, 2).save(root.join("poster.png")).unwrap();
    }

    #[test]
    fn test_new_does_no_io() {
        let mut builder = ModBuilder::new("/definitely/not/here");
        assert!(builder.issues().is_empty());
        assert!(matches!(builder.mod_info(), Err(Error::ModDirectoryNotFound { .. })));
    }

    #[test]
    fn test_lazy_mod_info() {
        let temp = TempDir::new().unwrap();
        minimal_mod(temp.path(), "Test42");
        let mut builder = ModBuilder::new(temp.path());
        assert_eq!(builder.mod_info().unwrap().id, "Test42");

        builder.mod_info_mut().unwrap().name = "Renamed".to_string();
        assert_eq!(builder.mod_info().unwrap().name, "Renamed");
    }

    #[test]
    fn test_validate_resets_issues() {
        let temp = TempDir::new().unwrap();
        minimal_mod(temp.path(), "Test42");
        let mut builder = ModBuilder::new(temp.path());

        let first = builder.validate().to_vec();
        assert_eq!(builder.validate(), first.as_slice());

        fs::remove_file(temp.path().join("poster.png")).unwrap();
        let errors = builder.validate().iter().filter(|i| i.is_error()).count();
        assert_eq!(errors, 1);

        image::RgbImage::new(2, 2).save(temp.path().join("poster.png")).unwrap();
        assert_eq!(builder.validate(), first.as_slice());
    }

    #[test]
    fn test_skip_validation_still_needs_descriptor() {
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut builder = ModBuilder::new(temp.path());
        let options = BuildOptions {
            skip_validation: true,
            ..BuildOptions::new(out.path())
        };
        assert!(matches!(builder.build(&options), Err(Error::DescriptorNotFound { .. })));
    }

    #[test]
    fn test_skip_validation_returns_no_issues() {
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(temp.path()).unwrap();
        fs::write(temp.path().join(MOD_INFO_FILE), "id=NoPoster\n").unwrap();

        let mut builder = ModBuilder::new(temp.path());
        let options = BuildOptions {
            skip_validation: true,
            ..BuildOptions::new(out.path())
        };
        let output = builder.build(&options).unwrap();
        assert!(output.issues.is_empty());
        assert!(!output.forced);
        assert_eq!(output.path, out.path().join("NoPoster.zip"));
        assert_eq!(output.file_count, 1);
    }

    #[test]
    fn test_progress_phases() {
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        minimal_mod(temp.path(), "Test42");

        let phases = std::sync::Mutex::new(Vec::new());
        let mut builder = ModBuilder::new(temp.path());
        builder
            .build_with_progress(&BuildOptions::new(out.path()), &|p| {
                phases.lock().unwrap().push(p.phase);
            })
            .unwrap();

        let phases = phases.into_inner().unwrap();
        assert_eq!(phases.first(), Some(&ModPhase::Validating));
        assert!(phases.contains(&ModPhase::Packaging));
        assert_eq!(phases.last(), Some(&ModPhase::Complete));
    }

    #[test]
    fn test_output_name() {
        let dir = Path::new("/mods/My Mod");
        assert_eq!(output_name(&ModInfo::parse("id=Good_1\n"), dir), "Good_1");
        assert_eq!(output_name(&ModInfo::parse("id=Bad Id!\n"), dir), "Bad_Id");
        assert_eq!(output_name(&ModInfo::parse("id=!!!\n"), dir), "My_Mod");
        assert_eq!(output_name(&ModInfo::default(), Path::new("/")), "mod");
    }

    #[test]
    fn test_forced_build_reports_errors() {
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        minimal_mod(temp.path(), "Bad Id!");

        let mut builder = ModBuilder::new(temp.path());
        let blocked = builder.build(&BuildOptions::new(out.path()));
        match blocked {
            Err(Error::ValidationFailed { issues }) => {
                assert!(issues.iter().any(|i| i.kind == IssueKind::MalformedField));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        let options = BuildOptions {
            force: true,
            ..BuildOptions::new(out.path())
        };
        let output = builder.build(&options).unwrap();
        assert!(output.forced);
        assert_eq!(output.path, out.path().join("Bad_Id.zip"));
    }
}
