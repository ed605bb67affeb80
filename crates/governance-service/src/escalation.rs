//! Escalation tracking: route unresolved violations to a human.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};

use governance_store::{AuditRecorder, EscalationStore, NotificationStore, WorkflowStore};
use governance_types::{
    AuditActor, AuditEvent, BusinessId, EscalationId, EscalationStatus, GovernanceEscalation,
    Notification, UserId, ViolationType, WorkflowId,
};

use crate::audit::record_best_effort;
use crate::error::{ServiceError, ServiceResult};

/// An escalation joined with its workflow's display name.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedEscalation {
    #[serde(flatten)]
    pub escalation: GovernanceEscalation,
    pub workflow_name: String,
}

pub(crate) struct EscalationService {
    escalations: Arc<dyn EscalationStore>,
    workflows: Arc<dyn WorkflowStore>,
    notifications: Arc<dyn NotificationStore>,
    audit: Arc<dyn AuditRecorder>,
}

impl EscalationService {
    pub fn new(
        escalations: Arc<dyn EscalationStore>,
        workflows: Arc<dyn WorkflowStore>,
        notifications: Arc<dyn NotificationStore>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            escalations,
            workflows,
            notifications,
            audit,
        }
    }

    /// Create a pending escalation, notify the target, and record an
    /// audit entry. Repeated escalations of the same violation create
    /// separate rows — there is no dedup or counter bump.
    #[instrument(skip(self, actor, notes))]
    pub async fn escalate(
        &self,
        actor: AuditActor,
        business_id: &BusinessId,
        workflow_id: &WorkflowId,
        violation: ViolationType,
        escalated_to: UserId,
        notes: Option<String>,
    ) -> ServiceResult<EscalationId> {
        let workflow = self
            .workflows
            .get(workflow_id)
            .await?
            .ok_or_else(|| ServiceError::WorkflowNotFound(workflow_id.clone()))?;

        let escalation = GovernanceEscalation::new(
            business_id.clone(),
            workflow_id.clone(),
            violation,
            escalated_to.clone(),
            notes,
        );
        let escalation_id = escalation.id.clone();
        self.escalations.insert(escalation).await?;

        self.notifications
            .insert(Notification::high(
                escalated_to.clone(),
                "Governance escalation",
                format!(
                    "Workflow \"{}\" has an unresolved {} violation",
                    workflow.name, violation
                ),
            ))
            .await?;

        info!(
            escalation_id = %escalation_id,
            workflow_id = %workflow_id,
            violation = %violation,
            escalated_to = %escalated_to,
            "violation escalated"
        );

        record_best_effort(
            self.audit.as_ref(),
            AuditEvent::new(actor, "governance.escalate")
                .for_workflow(workflow_id.clone())
                .for_business(business_id.clone())
                .with_context("violation", violation.as_str())
                .with_context("escalated_to", escalated_to.as_str()),
        )
        .await;

        Ok(escalation_id)
    }

    /// Escalations for a business, optionally filtered by status, each
    /// enriched with the workflow's display name.
    pub async fn list(
        &self,
        business_id: &BusinessId,
        status: Option<EscalationStatus>,
    ) -> ServiceResult<Vec<EnrichedEscalation>> {
        let escalations = self
            .escalations
            .list_for_business(business_id, status)
            .await?;
        let mut enriched = Vec::with_capacity(escalations.len());
        for escalation in escalations {
            let workflow_name = match self.workflows.get(&escalation.workflow_id).await? {
                Some(workflow) => workflow.name,
                None => escalation.workflow_id.to_string(),
            };
            enriched.push(EnrichedEscalation {
                escalation,
                workflow_name,
            });
        }
        Ok(enriched)
    }

    /// Transition a pending escalation to resolved. Terminal.
    #[instrument(skip(self, actor, resolution))]
    pub async fn resolve(
        &self,
        actor: AuditActor,
        escalation_id: &EscalationId,
        resolution: impl Into<String>,
    ) -> ServiceResult<()> {
        let mut escalation = self
            .escalations
            .get(escalation_id)
            .await?
            .ok_or_else(|| ServiceError::EscalationNotFound(escalation_id.clone()))?;

        escalation
            .resolve(resolution, Utc::now())
            .map_err(|err| ServiceError::InvalidTransition(err.to_string()))?;
        self.escalations.update(escalation.clone()).await?;

        info!(escalation_id = %escalation_id, "escalation resolved");

        record_best_effort(
            self.audit.as_ref(),
            AuditEvent::new(actor, "governance.resolve_escalation")
                .for_workflow(escalation.workflow_id.clone())
                .for_business(escalation.business_id.clone())
                .with_context("violation", escalation.violation_type.as_str()),
        )
        .await;

        Ok(())
    }
}
