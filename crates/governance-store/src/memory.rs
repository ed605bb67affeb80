//! In-memory storage backends.
//!
//! Backed by `DashMap` plus an insertion-order index where listing
//! order matters. Suitable for tests and single-process deployments.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;

use governance_types::{
    AuditEntry, AuditEvent, AutomationSettings, BusinessId, BusinessRecord, EscalationId,
    EscalationStatus, GovernanceEscalation, GovernanceHealth, Notification, UserId,
    WorkflowId, WorkflowRecord, WorkflowStep,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{
    AuditRecorder, BusinessStore, EscalationStore, NotificationStore, SettingsStore,
    WorkflowStore,
};

/// Workflow store on a concurrent map with an insertion-order index.
#[derive(Default)]
pub struct InMemoryWorkflowStore {
    records: DashMap<WorkflowId, WorkflowRecord>,
    order: RwLock<Vec<WorkflowId>>,
}

impl InMemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn insert(&self, workflow: WorkflowRecord) -> StoreResult<()> {
        let id = workflow.id.clone();
        if self.records.insert(id.clone(), workflow).is_none() {
            self.order.write().push(id);
        }
        Ok(())
    }

    async fn get(&self, id: &WorkflowId) -> StoreResult<Option<WorkflowRecord>> {
        Ok(self.records.get(id).map(|r| r.clone()))
    }

    async fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> StoreResult<Vec<WorkflowRecord>> {
        let order = self.order.read();
        Ok(order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|r| &r.business_id == business_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn set_health(&self, id: &WorkflowId, health: GovernanceHealth) -> StoreResult<()> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::WorkflowNotFound(id.clone()))?;
        record.governance_health = Some(health);
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn set_steps(&self, id: &WorkflowId, steps: Vec<WorkflowStep>) -> StoreResult<()> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::WorkflowNotFound(id.clone()))?;
        record.document.steps = Some(steps);
        record.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBusinessStore {
    records: DashMap<BusinessId, BusinessRecord>,
}

impl InMemoryBusinessStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BusinessStore for InMemoryBusinessStore {
    async fn insert(&self, business: BusinessRecord) -> StoreResult<()> {
        self.records.insert(business.id.clone(), business);
        Ok(())
    }

    async fn get(&self, id: &BusinessId) -> StoreResult<Option<BusinessRecord>> {
        Ok(self.records.get(id).map(|r| r.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryEscalationStore {
    records: DashMap<EscalationId, GovernanceEscalation>,
    order: RwLock<Vec<EscalationId>>,
}

impl InMemoryEscalationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EscalationStore for InMemoryEscalationStore {
    async fn insert(&self, escalation: GovernanceEscalation) -> StoreResult<()> {
        let id = escalation.id.clone();
        if self.records.insert(id.clone(), escalation).is_none() {
            self.order.write().push(id);
        }
        Ok(())
    }

    async fn get(&self, id: &EscalationId) -> StoreResult<Option<GovernanceEscalation>> {
        Ok(self.records.get(id).map(|r| r.clone()))
    }

    async fn list_for_business(
        &self,
        business_id: &BusinessId,
        status: Option<EscalationStatus>,
    ) -> StoreResult<Vec<GovernanceEscalation>> {
        let order = self.order.read();
        Ok(order
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id))
            .filter(|e| &e.business_id == business_id)
            .filter(|e| status.map_or(true, |s| e.status == s))
            .map(|e| e.clone())
            .collect())
    }

    async fn update(&self, escalation: GovernanceEscalation) -> StoreResult<()> {
        let id = escalation.id.clone();
        if !self.records.contains_key(&id) {
            return Err(StoreError::EscalationNotFound(id));
        }
        self.records.insert(id, escalation);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySettingsStore {
    records: DashMap<BusinessId, AutomationSettings>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, business_id: &BusinessId) -> StoreResult<Option<AutomationSettings>> {
        Ok(self.records.get(business_id).map(|r| r.clone()))
    }

    async fn put(&self, settings: AutomationSettings) -> StoreResult<()> {
        self.records.insert(settings.business_id.clone(), settings);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationStore {
    records: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn insert(&self, notification: Notification) -> StoreResult<()> {
        self.records.write().push(notification);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> StoreResult<Vec<Notification>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|n| &n.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// In-memory audit recorder keeping an ordered log.
#[derive(Default)]
pub struct MemoryAuditRecorder {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }
}

#[async_trait]
impl AuditRecorder for MemoryAuditRecorder {
    async fn record(&self, event: AuditEvent) -> StoreResult<AuditEntry> {
        let entry = AuditEntry::stamp(event, Utc::now());
        self.entries.write().push(entry.clone());
        Ok(entry)
    }
}

/// A recorder that always fails. Exercises the callers' best-effort
/// audit branch.
#[derive(Default)]
pub struct FailingAuditRecorder;

#[async_trait]
impl AuditRecorder for FailingAuditRecorder {
    async fn record(&self, _event: AuditEvent) -> StoreResult<AuditEntry> {
        Err(StoreError::Backend("audit recorder unavailable".into()))
    }
}
