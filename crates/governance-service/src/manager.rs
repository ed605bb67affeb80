//! The governance service facade.
//!
//! Wires the per-concern services over injected stores, owns caller
//! authentication, and broadcasts [`GovernanceEvent`]s as state
//! changes.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::instrument;

use governance_store::{
    AuditRecorder, BusinessStore, EscalationStore, NotificationStore, SettingsStore,
    WorkflowStore,
};
use governance_types::{
    AutomationSettings, BusinessId, EscalationId, EscalationStatus, GovernanceHealth,
    UserId, ViolationType, WorkflowId,
};

use crate::caller::Caller;
use crate::config::GovernanceConfig;
use crate::enforcement::{
    BatchEnforcement, EnforcementService, EnforcementSummary, ValidationOutcome,
};
use crate::error::ServiceResult;
use crate::escalation::{EnrichedEscalation, EscalationService};
use crate::events::GovernanceEvent;
use crate::remediation::{RemediationOutcome, RemediationService};
use crate::settings::{SettingsService, SettingsUpdate};
use crate::trend::{GovernanceScoreTrend, TrendService};

/// Entry point for all governance operations.
///
/// Interactive entry points require a [`Caller::User`]; the
/// `_internal` variants exist for the scheduler and skip the check.
pub struct GovernanceService {
    pub(crate) workflows: Arc<dyn WorkflowStore>,
    pub(crate) enforcement: EnforcementService,
    pub(crate) remediation: RemediationService,
    pub(crate) escalation: EscalationService,
    pub(crate) settings: SettingsService,
    pub(crate) trend: TrendService,
    pub(crate) event_tx: broadcast::Sender<GovernanceEvent>,
}

impl GovernanceService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: GovernanceConfig,
        workflows: Arc<dyn WorkflowStore>,
        businesses: Arc<dyn BusinessStore>,
        escalations: Arc<dyn EscalationStore>,
        settings: Arc<dyn SettingsStore>,
        notifications: Arc<dyn NotificationStore>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity);

        Self {
            enforcement: EnforcementService::new(Arc::clone(&workflows)),
            remediation: RemediationService::new(
                Arc::clone(&workflows),
                businesses,
                Arc::clone(&audit),
            ),
            escalation: EscalationService::new(
                escalations,
                Arc::clone(&workflows),
                notifications,
                audit,
            ),
            settings: SettingsService::new(settings),
            trend: TrendService::new(
                Arc::clone(&workflows),
                config.compliance_threshold,
                config.trend_weeks,
                config.trend_jitter,
            ),
            workflows,
            event_tx,
        }
    }

    /// Subscribe to governance events.
    pub fn subscribe(&self) -> broadcast::Receiver<GovernanceEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: GovernanceEvent) {
        // nobody listening is fine
        let _ = self.event_tx.send(event);
    }

    /// Evaluate a workflow without persisting the result.
    #[instrument(skip(self, caller))]
    pub async fn evaluate_workflow(
        &self,
        caller: &Caller,
        workflow_id: &WorkflowId,
    ) -> ServiceResult<GovernanceHealth> {
        caller.require_user()?;
        self.enforcement.evaluate(workflow_id).await
    }

    /// Evaluate a workflow and persist the health onto its record.
    #[instrument(skip(self, caller))]
    pub async fn enforce_workflow(
        &self,
        caller: &Caller,
        workflow_id: &WorkflowId,
    ) -> ServiceResult<EnforcementSummary> {
        caller.require_user()?;
        let summary = self.enforcement.enforce(workflow_id).await?;
        self.emit(GovernanceEvent::HealthEnforced {
            workflow_id: summary.workflow_id.clone(),
            score: summary.score,
        });
        Ok(summary)
    }

    /// Evaluate and persist every workflow of a business.
    pub async fn enforce_business(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
    ) -> ServiceResult<BatchEnforcement> {
        caller.require_user()?;
        self.enforce_business_inner(business_id).await
    }

    /// Scheduler variant of [`enforce_business`]: no interactive auth.
    ///
    /// [`enforce_business`]: Self::enforce_business
    pub async fn enforce_business_internal(
        &self,
        business_id: &BusinessId,
    ) -> ServiceResult<BatchEnforcement> {
        self.enforce_business_inner(business_id).await
    }

    async fn enforce_business_inner(
        &self,
        business_id: &BusinessId,
    ) -> ServiceResult<BatchEnforcement> {
        let batch = self.enforcement.enforce_business(business_id).await?;
        self.emit(GovernanceEvent::BatchCompleted {
            business_id: business_id.clone(),
            count: batch.count,
        });
        Ok(batch)
    }

    /// Pre-submit gate: evaluate without persisting, `ok` iff no
    /// error-severity issues.
    #[instrument(skip(self, caller))]
    pub async fn validate_workflow(
        &self,
        caller: &Caller,
        workflow_id: &WorkflowId,
    ) -> ServiceResult<ValidationOutcome> {
        caller.require_user()?;
        self.enforcement.validate(workflow_id).await
    }

    /// Mutate a workflow's steps to satisfy a named violation. Does
    /// not re-evaluate — call [`enforce_workflow`] afterwards.
    ///
    /// [`enforce_workflow`]: Self::enforce_workflow
    #[instrument(skip(self, caller))]
    pub async fn auto_remediate(
        &self,
        caller: &Caller,
        workflow_id: &WorkflowId,
        violation: ViolationType,
    ) -> ServiceResult<RemediationOutcome> {
        caller.require_user()?;
        let outcome = self
            .remediation
            .auto_remediate(caller.audit_actor(), workflow_id, violation)
            .await?;
        if outcome.remediated {
            self.emit(GovernanceEvent::RemediationApplied {
                workflow_id: workflow_id.clone(),
                violation,
            });
        }
        Ok(outcome)
    }

    /// Escalate a violation to a human.
    #[instrument(skip(self, caller, notes))]
    pub async fn escalate_violation(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
        workflow_id: &WorkflowId,
        violation: ViolationType,
        escalated_to: UserId,
        notes: Option<String>,
    ) -> ServiceResult<EscalationId> {
        caller.require_user()?;
        let escalation_id = self
            .escalation
            .escalate(
                caller.audit_actor(),
                business_id,
                workflow_id,
                violation,
                escalated_to,
                notes,
            )
            .await?;
        self.emit(GovernanceEvent::EscalationRaised {
            escalation_id: escalation_id.clone(),
            workflow_id: workflow_id.clone(),
            violation,
        });
        Ok(escalation_id)
    }

    /// Escalations for a business, enriched with workflow names.
    pub async fn get_escalations(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
        status: Option<EscalationStatus>,
    ) -> ServiceResult<Vec<EnrichedEscalation>> {
        caller.require_user()?;
        self.escalation.list(business_id, status).await
    }

    /// Resolve a pending escalation. Terminal.
    #[instrument(skip(self, caller, resolution))]
    pub async fn resolve_escalation(
        &self,
        caller: &Caller,
        escalation_id: &EscalationId,
        resolution: impl Into<String>,
    ) -> ServiceResult<()> {
        caller.require_user()?;
        self.escalation
            .resolve(caller.audit_actor(), escalation_id, resolution)
            .await?;
        self.emit(GovernanceEvent::EscalationResolved {
            escalation_id: escalation_id.clone(),
        });
        Ok(())
    }

    /// Automation settings, lazily created with safe defaults.
    pub async fn get_automation_settings(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
    ) -> ServiceResult<AutomationSettings> {
        caller.require_user()?;
        self.settings.get(business_id).await
    }

    /// Replace the automation settings wholesale.
    pub async fn update_automation_settings(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
        update: SettingsUpdate,
    ) -> ServiceResult<AutomationSettings> {
        caller.require_user()?;
        self.settings.update(business_id, update).await
    }

    /// Current compliance picture plus the synthetic history series.
    pub async fn governance_score_trend(
        &self,
        caller: &Caller,
        business_id: &BusinessId,
    ) -> ServiceResult<GovernanceScoreTrend> {
        caller.require_user()?;
        self.trend.trend(business_id).await
    }
}
