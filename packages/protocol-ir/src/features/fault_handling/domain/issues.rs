/*
 * Protocol Issues
 *
 * Property violations found while analyzing a protocol. Issues are
 * accumulated and returned, never raised.
 */

use serde::{Deserialize, Serialize};

/// Issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Fault handler increases capabilities, does not reduce requirements, or cycles
    WellFormedness,

    /// Two recovery successors (or operation targets) cannot be told apart
    Determinism,

    /// Recovery relation not closed under concurrent faults
    RaceFreedom,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::WellFormedness => write!(f, "Well-formedness"),
            IssueCategory::Determinism => write!(f, "Determinism"),
            IssueCategory::RaceFreedom => write!(f, "Race freedom"),
        }
    }
}

/// Protocol issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub category: IssueCategory,
    pub message: String,
}

impl Issue {
    pub fn new(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn well_formedness(message: impl Into<String>) -> Self {
        Self::new(IssueCategory::WellFormedness, message)
    }

    pub fn determinism(message: impl Into<String>) -> Self {
        Self::new(IssueCategory::Determinism, message)
    }

    pub fn race_freedom(message: impl Into<String>) -> Self {
        Self::new(IssueCategory::RaceFreedom, message)
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Count issues per category: (well-formedness, determinism, race freedom)
pub fn count_by_category(issues: &[Issue]) -> (usize, usize, usize) {
    issues
        .iter()
        .fold((0, 0, 0), |(w, d, r), issue| match issue.category {
            IssueCategory::WellFormedness => (w + 1, d, r),
            IssueCategory::Determinism => (w, d + 1, r),
            IssueCategory::RaceFreedom => (w, d, r + 1),
        })
}
