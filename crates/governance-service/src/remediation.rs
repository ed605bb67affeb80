//! Auto-remediation: mutate a workflow's steps to satisfy a named
//! violation.
//!
//! The tier driving SLA minimums comes from the owning business,
//! defaulting to solopreneur when unresolvable. Remediation never
//! re-evaluates — callers re-trigger enforcement themselves.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use governance_engine::{normalize, plan_remediation};
use governance_store::{AuditRecorder, BusinessStore, WorkflowStore};
use governance_types::{AuditActor, AuditEvent, Tier, ViolationType, WorkflowId};

use crate::audit::record_best_effort;
use crate::error::{ServiceError, ServiceResult};

/// What a remediation call did.
#[derive(Debug, Clone, Serialize)]
pub struct RemediationOutcome {
    pub remediated: bool,
    pub action: String,
}

pub(crate) struct RemediationService {
    workflows: Arc<dyn WorkflowStore>,
    businesses: Arc<dyn BusinessStore>,
    audit: Arc<dyn AuditRecorder>,
}

impl RemediationService {
    pub fn new(
        workflows: Arc<dyn WorkflowStore>,
        businesses: Arc<dyn BusinessStore>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            workflows,
            businesses,
            audit,
        }
    }

    #[instrument(skip(self, actor))]
    pub async fn auto_remediate(
        &self,
        actor: AuditActor,
        workflow_id: &WorkflowId,
        violation: ViolationType,
    ) -> ServiceResult<RemediationOutcome> {
        let workflow = self
            .workflows
            .get(workflow_id)
            .await?
            .ok_or_else(|| ServiceError::WorkflowNotFound(workflow_id.clone()))?;

        let tier = match self.businesses.get(&workflow.business_id).await? {
            Some(business) => business.tier.unwrap_or(Tier::Solopreneur),
            None => Tier::Solopreneur,
        };

        let mut steps = normalize(&workflow.document).steps;
        let Some(action) = plan_remediation(tier, violation, &mut steps) else {
            return Ok(RemediationOutcome {
                remediated: false,
                action: "No remediation applied".to_string(),
            });
        };

        self.workflows.set_steps(workflow_id, steps).await?;
        info!(
            workflow_id = %workflow_id,
            violation = %violation,
            action = %action.description,
            "workflow auto-remediated"
        );

        record_best_effort(
            self.audit.as_ref(),
            AuditEvent::new(actor, "governance.auto_remediate")
                .for_workflow(workflow_id.clone())
                .for_business(workflow.business_id.clone())
                .with_context("violation", violation.as_str())
                .with_context("action", action.description.as_str()),
        )
        .await;

        Ok(RemediationOutcome {
            remediated: true,
            action: action.description,
        })
    }
}
