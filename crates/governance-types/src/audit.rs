//! Audit events and entries.
//!
//! Mutations that change governance state (remediation, escalation,
//! resolution) describe themselves as an [`AuditEvent`]; the recorder
//! stamps it into an [`AuditEntry`]. Enforcement itself writes no
//! audit entries — persistence of a recomputed health is not an
//! auditable decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::{AuditEntryId, BusinessId, UserId, WorkflowId};

/// Who performed an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum AuditActor {
    User(UserId),
    /// Scheduler-triggered or otherwise non-interactive.
    System,
}

impl AuditActor {
    pub fn describe(&self) -> String {
        match self {
            Self::User(id) => format!("user:{id}"),
            Self::System => "system".to_string(),
        }
    }
}

/// An unstamped description of an audited action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor: AuditActor,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<WorkflowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl AuditEvent {
    pub fn new(actor: AuditActor, action: impl Into<String>) -> Self {
        Self {
            actor,
            action: action.into(),
            workflow_id: None,
            business_id: None,
            context: HashMap::new(),
        }
    }

    pub fn for_workflow(mut self, workflow_id: WorkflowId) -> Self {
        self.workflow_id = Some(workflow_id);
        self
    }

    pub fn for_business(mut self, business_id: BusinessId) -> Self {
        self.business_id = Some(business_id);
        self
    }

    /// Attach a context value. Values that fail to serialize are
    /// dropped silently rather than failing the mutation they describe.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.context.insert(key.into(), value);
        }
        self
    }
}

/// A stamped, persisted audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AuditEvent,
}

impl AuditEntry {
    pub fn stamp(event: AuditEvent, at: DateTime<Utc>) -> Self {
        Self {
            id: AuditEntryId::generate(),
            recorded_at: at,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_attaches_references_and_context() {
        let event = AuditEvent::new(AuditActor::System, "auto_remediate")
            .for_workflow(WorkflowId::new("wf-1"))
            .for_business(BusinessId::new("biz-1"))
            .with_context("violation", "missing_approval");

        assert_eq!(event.action, "auto_remediate");
        assert_eq!(event.workflow_id, Some(WorkflowId::new("wf-1")));
        assert_eq!(
            event.context.get("violation").and_then(|v| v.as_str()),
            Some("missing_approval")
        );
    }

    #[test]
    fn stamp_assigns_id_and_time() {
        let at = Utc::now();
        let entry = AuditEntry::stamp(
            AuditEvent::new(AuditActor::User(UserId::new("u1")), "escalate"),
            at,
        );
        assert_eq!(entry.recorded_at, at);
        assert_eq!(entry.event.actor.describe(), "user:u1");
    }
}
