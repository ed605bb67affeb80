//! Remediation planning: mutate a step list to satisfy a named violation.
//!
//! The planner changes steps only; it never re-runs the evaluator.
//! Callers persist the updated sequence and re-trigger evaluation
//! themselves, which keeps the evaluate/remediate modules free of
//! circular calls.

use tracing::debug;

use governance_types::{Tier, ViolationType, WorkflowStep};

/// What a remediation run did, for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationAction {
    pub violation: ViolationType,
    pub description: String,
}

/// Apply the fix for `violation` to `steps`, using `tier` to pick SLA
/// minimums. Returns `None` when the workflow already satisfies the
/// rule and nothing was changed.
pub fn plan_remediation(
    tier: Tier,
    violation: ViolationType,
    steps: &mut Vec<WorkflowStep>,
) -> Option<RemediationAction> {
    let action = match violation {
        ViolationType::MissingApproval => add_missing_approval(tier, steps),
        ViolationType::InsufficientSla => raise_low_slas(tier, steps),
        ViolationType::InsufficientApprovals => add_second_approval(tier, steps),
        ViolationType::RoleDiversity => diversify_approver_roles(steps),
    };
    if let Some(action) = &action {
        debug!(violation = %action.violation, action = %action.description, "remediation planned");
    }
    action
}

fn add_missing_approval(tier: Tier, steps: &mut Vec<WorkflowStep>) -> Option<RemediationAction> {
    let sla = tier.remediation_sla_hours();
    steps.push(WorkflowStep::approval("admin", sla));
    Some(RemediationAction {
        violation: ViolationType::MissingApproval,
        description: format!("Added an admin approval step with a {sla}h SLA"),
    })
}

fn raise_low_slas(tier: Tier, steps: &mut [WorkflowStep]) -> Option<RemediationAction> {
    let minimum = tier.remediation_sla_hours();
    let mut raised = 0usize;
    for step in steps.iter_mut().filter(|s| s.is_approval()) {
        match step.sla_hours {
            Some(hours) if hours >= minimum => {}
            _ => {
                step.sla_hours = Some(minimum);
                raised += 1;
            }
        }
    }
    if raised == 0 {
        return None;
    }
    Some(RemediationAction {
        violation: ViolationType::InsufficientSla,
        description: format!("Raised the SLA of {raised} approval step(s) to {minimum}h"),
    })
}

fn add_second_approval(tier: Tier, steps: &mut Vec<WorkflowStep>) -> Option<RemediationAction> {
    if tier != Tier::Enterprise {
        return None;
    }
    let approvals = steps.iter().filter(|s| s.is_approval()).count();
    if approvals >= 2 {
        return None;
    }
    steps.push(WorkflowStep::approval("senior_admin", 48.0));
    Some(RemediationAction {
        violation: ViolationType::InsufficientApprovals,
        description: "Added a senior_admin approval step with a 48h SLA".to_string(),
    })
}

/// Forces the first approval to `admin` and the second to
/// `senior_admin` — a fixed assignment, not a diversity search.
fn diversify_approver_roles(steps: &mut [WorkflowStep]) -> Option<RemediationAction> {
    let mut approvals = steps.iter_mut().filter(|s| s.is_approval());
    let first = approvals.next();
    let second = approvals.next();
    match (first, second) {
        (Some(first), Some(second)) => {
            first.role = Some("admin".to_string());
            second.role = Some("senior_admin".to_string());
            Some(RemediationAction {
                violation: ViolationType::RoleDiversity,
                description:
                    "Assigned admin to the first approval and senior_admin to the second"
                        .to_string(),
            })
        }
        _ => None,
    }
}
