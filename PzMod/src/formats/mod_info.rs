//! `mod.info` descriptor parsing and serialization
//!
//! The descriptor is a line-oriented `key=value` text file. There is no
//! quoting, escaping or multi-line value syntax. Unknown keys are kept in
//! [`ModInfo::extra`] in the order they were first seen so they survive a
//! load/save cycle untouched.

use std::fmt;
use std::path::{Component, Path};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::mods::{IssueKind, ValidationIssue};

/// File name of the descriptor inside a mod root
pub const MOD_INFO_FILE: &str = "mod.info";

/// Poster image used when the descriptor does not name one
pub const DEFAULT_POSTER: &str = "poster.png";

/// Tile image used when the descriptor does not name one
pub const DEFAULT_TILE: &str = "tile.png";

/// Target game version written by [`ModInfo::new`]
pub const DEFAULT_PZ_VERSION: &str = "b42";

/// Key holding comma-separated ids of required mods
const REQUIRE_KEY: &str = "require";

/// Parsed `mod.info` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModInfo {
    pub name: String,
    pub id: String,
    pub description: String,
    pub poster: String,
    pub tile: String,
    pub authors: String,
    pub version: String,
    pub url: String,
    pub pzversion: String,
    /// Unrecognized keys, in first-seen order
    pub extra: IndexMap<String, String>,
}

impl ModInfo {
    /// Create a descriptor for a new mod with the initializer's defaults
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            version: "1.0".to_string(),
            pzversion: DEFAULT_PZ_VERSION.to_string(),
            ..Default::default()
        }
    }

    /// Parse descriptor text.
    ///
    /// Parsing is tolerant and never fails: blank lines, `#` lines, lines
    /// without `=` and lines with an empty key are skipped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut info = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                continue;
            }

            match info.field_mut(key) {
                Some(field) => *field = value.to_string(),
                None => {
                    info.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        info
    }

    /// Serialize to descriptor text.
    ///
    /// Recognized fields come first in canonical order (empty ones are
    /// omitted), followed by extras in their original order. The output
    /// always ends with a newline.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.fields() {
            if !value.is_empty() {
                push_line(&mut out, key, value);
            }
        }
        for (key, value) in &self.extra {
            push_line(&mut out, key, value);
        }
        if out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Read and parse a descriptor file
    ///
    /// # Errors
    /// Returns [`Error::DescriptorNotFound`] if the file does not exist and
    /// [`Error::Io`] if it cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::DescriptorNotFound {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize and write to a descriptor file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.serialize())?;
        Ok(())
    }

    /// Check field contents.
    ///
    /// Errors: empty name or id, id outside `[A-Za-z0-9_]`, image references
    /// that escape the mod root. Warnings: empty description, authors or
    /// poster.
    #[must_use]
    pub fn validate_fields(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.name.is_empty() {
            issues.push(
                ValidationIssue::error(IssueKind::MalformedField, "Mod name is required")
                    .with_reference("name"),
            );
        }
        if self.id.is_empty() {
            issues.push(
                ValidationIssue::error(IssueKind::MalformedField, "Mod ID is required")
                    .with_reference("id"),
            );
        } else if !is_safe_id(&self.id) {
            issues.push(
                ValidationIssue::error(
                    IssueKind::MalformedField,
                    format!(
                        "Mod ID '{}' must contain only letters, numbers, and underscores",
                        self.id
                    ),
                )
                .with_reference("id"),
            );
        }

        for (key, value) in [("poster", &self.poster), ("tile", &self.tile)] {
            if !value.is_empty() && !is_contained_path(value) {
                issues.push(
                    ValidationIssue::error(
                        IssueKind::MalformedField,
                        format!("Image path '{value}' must be relative to the mod root"),
                    )
                    .with_reference(key),
                );
            }
        }

        for (key, value, label) in [
            ("description", &self.description, "description"),
            ("authors", &self.authors, "authors"),
            ("poster", &self.poster, "poster image"),
        ] {
            if value.is_empty() {
                issues.push(
                    ValidationIssue::warning(
                        IssueKind::MissingField,
                        format!("Mod {label} should be set"),
                    )
                    .with_reference(key),
                );
            }
        }

        issues
    }

    /// Whether [`validate_fields`](Self::validate_fields) reports no errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.validate_fields().iter().any(ValidationIssue::is_error)
    }

    /// Poster file name, falling back to `poster.png`
    #[must_use]
    pub fn poster_file(&self) -> &str {
        if self.poster.is_empty() { DEFAULT_POSTER } else { self.poster.as_str() }
    }

    /// Tile file name, falling back to `tile.png`
    #[must_use]
    pub fn tile_file(&self) -> &str {
        if self.tile.is_empty() { DEFAULT_TILE } else { self.tile.as_str() }
    }

    /// Ids listed in the `require` key. Only reported, never resolved.
    #[must_use]
    pub fn requirements(&self) -> Vec<&str> {
        self.extra
            .get(REQUIRE_KEY)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Recognized fields in canonical order
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("name", &self.name),
            ("id", &self.id),
            ("description", &self.description),
            ("poster", &self.poster),
            ("tile", &self.tile),
            ("authors", &self.authors),
            ("version", &self.version),
            ("url", &self.url),
            ("pzversion", &self.pzversion),
        ]
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "name" => Some(&mut self.name),
            "id" => Some(&mut self.id),
            "description" => Some(&mut self.description),
            "poster" => Some(&mut self.poster),
            "tile" => Some(&mut self.tile),
            "authors" => Some(&mut self.authors),
            "version" => Some(&mut self.version),
            "url" => Some(&mut self.url),
            "pzversion" => Some(&mut self.pzversion),
            _ => None,
        }
    }
}

impl fmt::Display for ModInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    out.push_str(value);
    out.push('\n');
}

/// Whether `id` is a non-empty `[A-Za-z0-9_]+` token
#[must_use]
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a descriptor path stays inside the mod root
pub(crate) fn is_contained_path(value: &str) -> bool {
    Path::new(value)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
