//! The tier rule set.
//!
//! Each compliance rule is a struct implementing [`TierRule`]; the
//! evaluator runs them in a fixed registration order. Rules only read
//! the normalized workflow and the precomputed step aggregates — they
//! never touch the raw document.

use governance_types::{Issue, IssueCode, Severity, Tier};

use crate::normalize::{NormalizedWorkflow, StepAggregates};

/// Everything a rule may inspect.
pub struct RuleContext<'a> {
    pub workflow: &'a NormalizedWorkflow,
    pub aggregates: &'a StepAggregates,
}

impl RuleContext<'_> {
    fn tier(&self) -> Tier {
        self.workflow.tier
    }
}

/// One compliance rule. Returns the issue it raises, or `None` when
/// the rule holds (or does not apply to the workflow's tier).
pub trait TierRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue>;
}

/// SME and Enterprise workflows need at least one approval step.
pub struct ApprovalRequired;

impl TierRule for ApprovalRequired {
    fn name(&self) -> &'static str {
        "approval_required"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.tier().requires_approval() && ctx.aggregates.approval_count == 0 {
            return Some(Issue::error(
                IssueCode::MissingApproval,
                "At least one approval step is required for this tier",
            ));
        }
        None
    }
}

/// Enterprise workflows need a second, independent approval.
pub struct SecondApprovalRequired;

impl TierRule for SecondApprovalRequired {
    fn name(&self) -> &'static str {
        "second_approval_required"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.tier() == Tier::Enterprise && ctx.aggregates.approval_count < 2 {
            return Some(Issue::error(
                IssueCode::MissingSecondApproval,
                "Enterprise workflows require a second approval step",
            ));
        }
        None
    }
}

/// SME and Enterprise workflows must declare some SLA or delay.
pub struct SlaPresence;

impl TierRule for SlaPresence {
    fn name(&self) -> &'static str {
        "sla_presence"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if matches!(ctx.tier(), Tier::Sme | Tier::Enterprise) && !ctx.aggregates.has_sla_signal()
        {
            return Some(Issue::warn(
                IssueCode::MissingSla,
                "No SLA or delay is declared on any step",
            ));
        }
        None
    }
}

/// Role ownership: a warning for Enterprise, a nudge for Startup.
pub struct RolePresence;

impl TierRule for RolePresence {
    fn name(&self) -> &'static str {
        "role_presence"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.aggregates.any_role {
            return None;
        }
        match ctx.tier() {
            Tier::Enterprise => Some(Issue::warn(
                IssueCode::MissingRoles,
                "No step declares an owning role",
            )),
            Tier::Startup => Some(Issue::info(
                IssueCode::MissingRoles,
                "Consider assigning roles to steps",
            )),
            _ => None,
        }
    }
}

/// Solopreneur nudge: document the workflow.
pub struct DescriptionNudge;

impl TierRule for DescriptionNudge {
    fn name(&self) -> &'static str {
        "description_nudge"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.tier() == Tier::Solopreneur && ctx.workflow.description.is_none() {
            return Some(Issue::info(
                IssueCode::MissingDescription,
                "Add a short description to document this workflow",
            ));
        }
        None
    }
}

/// Effective SLA must meet the tier floor (SME ≥ 24h, Enterprise ≥ 48h).
///
/// Only fires when the workflow declares some SLA signal — a workflow
/// with no SLA at all is covered by [`SlaPresence`] instead. A bare
/// delay step counts as a 1-hour signal and so lands below any floor.
pub struct SlaFloor;

impl TierRule for SlaFloor {
    fn name(&self) -> &'static str {
        "sla_floor"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        let floor = ctx.tier().sla_floor_hours();
        if floor == 0.0 || !ctx.aggregates.has_sla_signal() {
            return None;
        }
        let effective = ctx.aggregates.effective_sla_hours;
        if effective >= floor {
            return None;
        }
        let severity = if ctx.tier() == Tier::Enterprise {
            Severity::Error
        } else {
            Severity::Warn
        };
        Some(Issue::new(
            IssueCode::SlaTooLow,
            severity,
            format!(
                "Effective SLA of {effective}h is below the {floor}h floor for {} workflows",
                ctx.tier()
            ),
        ))
    }
}

/// When human review is flagged, SME/Enterprise workflows must carry
/// an approval step to give that review somewhere to happen.
pub struct HumanReviewApproval;

impl TierRule for HumanReviewApproval {
    fn name(&self) -> &'static str {
        "human_review_approval"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if !ctx.workflow.human_review_required || ctx.aggregates.approval_count > 0 {
            return None;
        }
        let severity = match ctx.tier() {
            Tier::Enterprise => Severity::Error,
            Tier::Sme => Severity::Warn,
            _ => return None,
        };
        Some(Issue::new(
            IssueCode::MmrRequiresApproval,
            severity,
            "Human review is required but no approval step exists",
        ))
    }
}

/// Enterprise approver diversity: the first two approval steps must
/// not share a role.
///
/// Fires only when two or more approval steps exist — a one-approval
/// workflow is already penalized by [`SecondApprovalRequired`] and is
/// not double-counted here.
pub struct ApproverRoleDiversity;

impl TierRule for ApproverRoleDiversity {
    fn name(&self) -> &'static str {
        "approver_role_diversity"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.tier() != Tier::Enterprise || ctx.aggregates.approval_count < 2 {
            return None;
        }
        let mut approvals = ctx.workflow.steps.iter().filter(|s| s.is_approval());
        let first = approvals.next().and_then(|s| s.effective_role());
        let second = approvals.next().and_then(|s| s.effective_role());
        match (first, second) {
            (Some(a), Some(b)) if a == b => Some(Issue::error(
                IssueCode::ApproverRoleDiversityRequired,
                "The first two approval steps share the same approver role",
            )),
            _ => None,
        }
    }
}

/// Every workflow should carry a description; how loudly we say so
/// depends on the tier.
pub struct GeneralDescription;

impl TierRule for GeneralDescription {
    fn name(&self) -> &'static str {
        "general_description"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Option<Issue> {
        if ctx.workflow.description.is_some() {
            return None;
        }
        let severity = if matches!(ctx.tier(), Tier::Sme | Tier::Enterprise) {
            Severity::Warn
        } else {
            Severity::Info
        };
        Some(Issue::new(
            IssueCode::MissingDescriptionGeneral,
            severity,
            "Workflow has no description",
        ))
    }
}

/// The standard rule set in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn TierRule>> {
    vec![
        Box::new(ApprovalRequired),
        Box::new(SecondApprovalRequired),
        Box::new(SlaPresence),
        Box::new(RolePresence),
        Box::new(DescriptionNudge),
        Box::new(SlaFloor),
        Box::new(HumanReviewApproval),
        Box::new(ApproverRoleDiversity),
        Box::new(GeneralDescription),
    ]
}
