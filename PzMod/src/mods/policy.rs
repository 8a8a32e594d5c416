//! Build gate: decides whether validation results allow packaging

use super::types::ValidationIssue;

/// Outcome of the build gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDecision {
    /// No errors, build normally
    Proceed,
    /// Errors present but the caller forced the build
    ProceedForced,
    /// Errors present, build must not write anything
    Abort,
}

impl BuildDecision {
    #[must_use]
    pub fn proceeds(self) -> bool {
        !matches!(self, Self::Abort)
    }
}

/// Decide whether a build may go ahead.
///
/// Warnings never block. Errors block unless `force` is set.
#[must_use]
pub fn build_gate(issues: &[ValidationIssue], force: bool) -> BuildDecision {
    let has_errors = issues.iter().any(ValidationIssue::is_error);
    match (has_errors, force) {
        (false, _) => BuildDecision::Proceed,
        (true, true) => BuildDecision::ProceedForced,
        (true, false) => BuildDecision::Abort,
    }
}
