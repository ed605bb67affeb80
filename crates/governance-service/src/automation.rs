//! The automation sweep: evaluate → remediate → re-evaluate → escalate.
//!
//! Driven by each business's [`AutomationSettings`]: violation types
//! with auto-remediation enabled are fixed in place and the workflow
//! re-evaluated; the rest are escalated to the configured target once
//! the workflow carries enough error-severity issues. Runs as the
//! system — this is the scheduler's entry point.
//!
//! [`AutomationSettings`]: governance_types::AutomationSettings

use serde::Serialize;
use tracing::{info, instrument};

use governance_types::{AuditActor, BusinessId, EscalationId, ViolationType, WorkflowId};

use crate::error::ServiceResult;
use crate::events::GovernanceEvent;
use crate::manager::GovernanceService;

/// One violation the sweep fixed.
#[derive(Debug, Clone, Serialize)]
pub struct RemediatedViolation {
    pub workflow_id: WorkflowId,
    pub violation: ViolationType,
    pub action: String,
}

/// One violation the sweep left alone, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedViolation {
    pub workflow_id: WorkflowId,
    pub violation: ViolationType,
    pub reason: String,
}

/// Outcome of one automation sweep over a business.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationSweepReport {
    pub business_id: BusinessId,
    /// Workflows evaluated (and re-persisted) by this sweep.
    pub evaluated: usize,
    pub remediated: Vec<RemediatedViolation>,
    pub escalated: Vec<EscalationId>,
    pub skipped: Vec<SkippedViolation>,
}

impl GovernanceService {
    /// Run the governance feedback loop over every workflow of a
    /// business.
    ///
    /// Each workflow is enforced first; its error-severity violations
    /// are then either auto-remediated (and the workflow re-enforced)
    /// or escalated, per the business's automation settings.
    #[instrument(skip(self))]
    pub async fn run_automation_sweep(
        &self,
        business_id: &BusinessId,
    ) -> ServiceResult<AutomationSweepReport> {
        let settings = self.settings.get(business_id).await?;
        let workflows = self.workflows.list_for_business(business_id).await?;

        let mut report = AutomationSweepReport {
            business_id: business_id.clone(),
            evaluated: 0,
            remediated: Vec::new(),
            escalated: Vec::new(),
            skipped: Vec::new(),
        };

        for workflow in workflows {
            let mut health = self.enforcement.enforce_health(&workflow.id).await?;
            report.evaluated += 1;

            for violation in health.error_violation_types() {
                // an earlier remediation in this pass may have cleared it
                if !health.error_violation_types().contains(&violation) {
                    continue;
                }

                if settings.auto_remediate_enabled(violation) {
                    let outcome = self
                        .remediation
                        .auto_remediate(AuditActor::System, &workflow.id, violation)
                        .await?;
                    if outcome.remediated {
                        health = self.enforcement.enforce_health(&workflow.id).await?;
                        self.emit(GovernanceEvent::RemediationApplied {
                            workflow_id: workflow.id.clone(),
                            violation,
                        });
                        report.remediated.push(RemediatedViolation {
                            workflow_id: workflow.id.clone(),
                            violation,
                            action: outcome.action,
                        });
                    }
                    continue;
                }

                let Some(target) = settings.escalation_rules.escalate_to.clone() else {
                    report.skipped.push(SkippedViolation {
                        workflow_id: workflow.id.clone(),
                        violation,
                        reason: "no escalation target configured".to_string(),
                    });
                    continue;
                };

                if (health.error_count() as u32) < settings.escalation_rules.threshold {
                    report.skipped.push(SkippedViolation {
                        workflow_id: workflow.id.clone(),
                        violation,
                        reason: "below escalation threshold".to_string(),
                    });
                    continue;
                }

                let escalation_id = self
                    .escalation
                    .escalate(
                        AuditActor::System,
                        business_id,
                        &workflow.id,
                        violation,
                        target,
                        Some("Raised by automation sweep".to_string()),
                    )
                    .await?;
                self.emit(GovernanceEvent::EscalationRaised {
                    escalation_id: escalation_id.clone(),
                    workflow_id: workflow.id.clone(),
                    violation,
                });
                report.escalated.push(escalation_id);
            }
        }

        info!(
            business_id = %business_id,
            evaluated = report.evaluated,
            remediated = report.remediated.len(),
            escalated = report.escalated.len(),
            "automation sweep completed"
        );
        Ok(report)
    }
}
