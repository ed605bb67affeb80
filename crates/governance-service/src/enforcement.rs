//! Enforcement: evaluate workflows and persist the result.
//!
//! Enforcement writes health only — it never touches steps and never
//! records audit entries; those belong to the remediation and
//! escalation paths.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use governance_engine::HealthEvaluator;
use governance_store::WorkflowStore;
use governance_types::{BusinessId, GovernanceHealth, WorkflowId, WorkflowRecord};

use crate::error::{ServiceError, ServiceResult};

/// Compact result of enforcing a single workflow.
#[derive(Debug, Clone, Serialize)]
pub struct EnforcementSummary {
    pub workflow_id: WorkflowId,
    pub score: u8,
    /// Rendered issue messages, for callers that want the flat form.
    /// The structured issues live on the persisted health.
    pub issues: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowScore {
    pub id: WorkflowId,
    pub score: u8,
}

/// Result of a batch enforcement pass.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEnforcement {
    pub count: usize,
    pub updated: Vec<WorkflowScore>,
}

/// Pre-submit validation outcome: `ok` iff no error-severity issues.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub health: GovernanceHealth,
}

pub(crate) struct EnforcementService {
    workflows: Arc<dyn WorkflowStore>,
    evaluator: HealthEvaluator,
}

impl EnforcementService {
    pub fn new(workflows: Arc<dyn WorkflowStore>) -> Self {
        Self {
            workflows,
            evaluator: HealthEvaluator::new(),
        }
    }

    async fn load(&self, id: &WorkflowId) -> ServiceResult<WorkflowRecord> {
        self.workflows
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::WorkflowNotFound(id.clone()))
    }

    /// Evaluate without persisting.
    pub async fn evaluate(&self, id: &WorkflowId) -> ServiceResult<GovernanceHealth> {
        let workflow = self.load(id).await?;
        Ok(self.evaluator.evaluate(&workflow.document))
    }

    /// Evaluate and persist, returning the full structured health.
    #[instrument(skip(self))]
    pub async fn enforce_health(&self, id: &WorkflowId) -> ServiceResult<GovernanceHealth> {
        let workflow = self.load(id).await?;
        let health = self.evaluator.evaluate(&workflow.document);
        self.workflows.set_health(id, health.clone()).await?;
        info!(workflow_id = %id, score = health.score, "governance health enforced");
        Ok(health)
    }

    /// Evaluate and persist, replacing any prior health.
    pub async fn enforce(&self, id: &WorkflowId) -> ServiceResult<EnforcementSummary> {
        let health = self.enforce_health(id).await?;
        Ok(EnforcementSummary {
            workflow_id: id.clone(),
            score: health.score,
            issues: health.messages(),
            updated_at: health.updated_at,
        })
    }

    /// Sequential sweep over every workflow of a business.
    ///
    /// Each persisted health commits independently; a failure partway
    /// through leaves earlier workflows updated.
    #[instrument(skip(self))]
    pub async fn enforce_business(
        &self,
        business_id: &BusinessId,
    ) -> ServiceResult<BatchEnforcement> {
        let workflows = self.workflows.list_for_business(business_id).await?;
        let mut updated = Vec::with_capacity(workflows.len());
        for workflow in workflows {
            let health = self.evaluator.evaluate(&workflow.document);
            self.workflows.set_health(&workflow.id, health.clone()).await?;
            updated.push(WorkflowScore {
                id: workflow.id,
                score: health.score,
            });
        }
        info!(business_id = %business_id, count = updated.len(), "batch enforcement completed");
        Ok(BatchEnforcement {
            count: updated.len(),
            updated,
        })
    }

    /// Evaluate without persisting; `ok` iff no error-severity issues.
    pub async fn validate(&self, id: &WorkflowId) -> ServiceResult<ValidationOutcome> {
        let health = self.evaluate(id).await?;
        Ok(ValidationOutcome {
            ok: !health.has_errors(),
            health,
        })
    }
}
