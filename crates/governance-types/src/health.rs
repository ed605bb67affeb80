//! Governance health: the computed compliance score and issue list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::escalation::ViolationType;

/// How much a violated rule matters.
///
/// Error issues each subtract more score than warns; info issues cost
/// nothing and exist only as nudges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Stable identifier for a governance issue.
///
/// Codes are persisted alongside the rendered message so downstream
/// aggregation keys on the code, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingApproval,
    MissingSecondApproval,
    MissingSla,
    MissingRoles,
    MissingDescription,
    SlaTooLow,
    MmrRequiresApproval,
    ApproverRoleDiversityRequired,
    MissingDescriptionGeneral,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingApproval => "missing_approval",
            Self::MissingSecondApproval => "missing_second_approval",
            Self::MissingSla => "missing_sla",
            Self::MissingRoles => "missing_roles",
            Self::MissingDescription => "missing_description",
            Self::SlaTooLow => "sla_too_low",
            Self::MmrRequiresApproval => "mmr_requires_approval",
            Self::ApproverRoleDiversityRequired => "approver_role_diversity_required",
            Self::MissingDescriptionGeneral => "missing_description_general",
        }
    }

    /// The auto-remediable violation category this code maps to.
    ///
    /// Description and role-nudge codes return `None`: there is no
    /// mechanical fix to apply, so they are never routed to the
    /// remediation engine or the escalation tracker.
    pub fn violation_type(&self) -> Option<ViolationType> {
        match self {
            Self::MissingApproval | Self::MmrRequiresApproval => {
                Some(ViolationType::MissingApproval)
            }
            Self::MissingSecondApproval => Some(ViolationType::InsufficientApprovals),
            Self::MissingSla | Self::SlaTooLow => Some(ViolationType::InsufficientSla),
            Self::ApproverRoleDiversityRequired => Some(ViolationType::RoleDiversity),
            Self::MissingRoles | Self::MissingDescription | Self::MissingDescriptionGeneral => {
                None
            }
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule: a stable code, a severity, and human text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(code: IssueCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    pub fn warn(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warn, message)
    }

    pub fn info(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, message)
    }
}

/// Computed compliance state of one workflow.
///
/// Owned by exactly one workflow record; recomputed wholesale on every
/// evaluation and overwritten in place — never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceHealth {
    /// Clamped to 0–100.
    pub score: u8,
    pub issues: Vec<Issue>,
    pub updated_at: DateTime<Utc>,
}

impl GovernanceHealth {
    pub fn new(score: u8, issues: Vec<Issue>, updated_at: DateTime<Utc>) -> Self {
        Self {
            score: score.min(100),
            issues,
            updated_at,
        }
    }

    /// Rendered messages in issue order, for callers that want the
    /// flat display form.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn is_compliant(&self, threshold: u8) -> bool {
        self.score >= threshold
    }

    pub fn has_issue(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Distinct violation types behind the error-severity issues, in
    /// first-occurrence order. This is what automation acts on.
    pub fn error_violation_types(&self) -> Vec<ViolationType> {
        let mut seen = Vec::new();
        for issue in &self.issues {
            if issue.severity != Severity::Error {
                continue;
            }
            if let Some(vt) = issue.code.violation_type() {
                if !seen.contains(&vt) {
                    seen.push(vt);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn score_is_clamped_to_100() {
        let health = GovernanceHealth::new(250, Vec::new(), Utc::now());
        assert_eq!(health.score, 100);
    }

    #[test]
    fn issue_codes_serialize_snake_case() {
        let json = serde_json::to_string(&IssueCode::ApproverRoleDiversityRequired).unwrap();
        assert_eq!(json, "\"approver_role_diversity_required\"");
    }

    #[test]
    fn error_violation_types_dedupes_and_skips_unmappable() {
        let health = GovernanceHealth::new(
            20,
            vec![
                Issue::error(IssueCode::MissingApproval, "a"),
                Issue::error(IssueCode::MmrRequiresApproval, "b"),
                Issue::warn(IssueCode::SlaTooLow, "c"),
                Issue::error(IssueCode::MissingSecondApproval, "d"),
            ],
            Utc::now(),
        );
        assert_eq!(
            health.error_violation_types(),
            vec![
                ViolationType::MissingApproval,
                ViolationType::InsufficientApprovals,
            ]
        );
    }

    #[test]
    fn compliance_threshold() {
        let health = GovernanceHealth::new(80, Vec::new(), Utc::now());
        assert!(health.is_compliant(80));
        assert!(!health.is_compliant(81));
    }

    #[test]
    fn messages_preserve_issue_order() {
        let health = GovernanceHealth::new(
            45,
            vec![
                Issue::error(IssueCode::MissingSecondApproval, "second approval"),
                Issue::warn(IssueCode::MissingDescriptionGeneral, "no description"),
            ],
            Utc::now(),
        );
        assert_eq!(health.messages(), vec!["second approval", "no description"]);
    }
}
