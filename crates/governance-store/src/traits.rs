//! Storage trait definitions.
//!
//! `get` returns `Ok(None)` for missing records; the targeted patch
//! operations (`set_health`, `set_steps`, `update`) fail with a
//! not-found error instead, since patching nothing is a caller bug.

use async_trait::async_trait;

use governance_types::{
    AuditEntry, AuditEvent, AutomationSettings, BusinessId, BusinessRecord, EscalationId,
    EscalationStatus, GovernanceEscalation, GovernanceHealth, Notification, UserId,
    WorkflowId, WorkflowRecord, WorkflowStep,
};

use crate::error::StoreResult;

/// Workflow record persistence.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn insert(&self, workflow: WorkflowRecord) -> StoreResult<()>;

    async fn get(&self, id: &WorkflowId) -> StoreResult<Option<WorkflowRecord>>;

    /// All workflows of a business, in insertion order. Batch
    /// enforcement iterates this sequentially.
    async fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> StoreResult<Vec<WorkflowRecord>>;

    /// Overwrite the workflow's governance health in place.
    async fn set_health(&self, id: &WorkflowId, health: GovernanceHealth) -> StoreResult<()>;

    /// Replace the workflow's step sequence (remediation's persistence
    /// point).
    async fn set_steps(&self, id: &WorkflowId, steps: Vec<WorkflowStep>) -> StoreResult<()>;
}

/// Business record persistence.
#[async_trait]
pub trait BusinessStore: Send + Sync {
    async fn insert(&self, business: BusinessRecord) -> StoreResult<()>;

    async fn get(&self, id: &BusinessId) -> StoreResult<Option<BusinessRecord>>;
}

/// Escalation record persistence.
#[async_trait]
pub trait EscalationStore: Send + Sync {
    async fn insert(&self, escalation: GovernanceEscalation) -> StoreResult<()>;

    async fn get(&self, id: &EscalationId) -> StoreResult<Option<GovernanceEscalation>>;

    /// Escalations for a business, newest first, optionally filtered
    /// by status.
    async fn list_for_business(
        &self,
        business_id: &BusinessId,
        status: Option<EscalationStatus>,
    ) -> StoreResult<Vec<GovernanceEscalation>>;

    /// Replace an existing escalation record wholesale.
    async fn update(&self, escalation: GovernanceEscalation) -> StoreResult<()>;
}

/// Per-business automation settings persistence.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, business_id: &BusinessId) -> StoreResult<Option<AutomationSettings>>;

    /// Insert or replace wholesale — there is no merge.
    async fn put(&self, settings: AutomationSettings) -> StoreResult<()>;
}

/// Notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: Notification) -> StoreResult<()>;

    async fn list_for_user(&self, user_id: &UserId) -> StoreResult<Vec<Notification>>;
}

/// The audit collaborator injected into every mutation that records
/// governance decisions. Callers treat failures as best-effort: a
/// recorder error is logged and swallowed, never propagated.
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    async fn record(&self, event: AuditEvent) -> StoreResult<AuditEntry>;
}
