//! Types for validation results and mod operation progress

use std::fmt;

use serde::Serialize;

/// How much a validation finding matters for packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth fixing, never blocks a build.
    Warning,
    /// Marks the mod invalid for packaging unless the build is forced.
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    /// Mod root or `mod.info` is absent. Always stops validation.
    NotFound,
    /// Identifier or name empty, identifier unsafe, image path escapes root.
    MalformedField,
    /// Recommended descriptor field left empty.
    MissingField,
    /// Poster (error) or tile (warning) image file absent.
    MissingAsset,
    /// Poster or tile exists but is not a readable image.
    InvalidImage,
    /// No populated content folder under `media/`.
    EmptyContent,
    /// A filesystem entry under `media/` could not be scanned.
    UnreadableEntry,
    /// A media file has an extension the game does not normally load.
    UnusualExtension,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Human-readable description
    pub message: String,
    /// The descriptor field or relative file path the issue is about
    pub reference: Option<String>,
}

impl ValidationIssue {
    /// Create an error-severity issue
    #[must_use]
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            reference: None,
        }
    }

    /// Create a warning-severity issue
    #[must_use]
    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            reference: None,
        }
    }

    /// Attach the field or file this issue refers to
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "[{}] {} ({reference})", self.severity, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Progress callback type for mod operations
pub type ModProgressCallback<'a> = &'a (dyn Fn(&ModProgress) + Sync + Send);

/// Progress information during mod operations
#[derive(Debug, Clone)]
pub struct ModProgress {
    /// Current operation phase
    pub phase: ModPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl ModProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: ModPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file/item name
    #[must_use]
    pub fn with_file(phase: ModPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of mod operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModPhase {
    /// Validating mod structure
    Validating,
    /// Collecting the file manifest
    Collecting,
    /// Writing the archive or copying files
    Packaging,
    /// Operation complete
    Complete,
}

impl ModPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "Validating structure",
            Self::Collecting => "Collecting files",
            Self::Packaging => "Packaging",
            Self::Complete => "Complete",
        }
    }
}
