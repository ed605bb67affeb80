//! Workflow step descriptors.
//!
//! Steps are read-only inputs to evaluation; remediation appends or
//! mutates entries in the sequence.

use serde::{Deserialize, Serialize};

/// Step type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Approval,
    Delay,
    /// Any other tag the CRUD layer uses (`task`, `notify`, ...).
    #[serde(untagged)]
    Other(String),
}

/// One element of a workflow's ordered step sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Owning role. Some producers write `assignee_role` or
    /// `owner_role` instead; `effective_role` resolves the first
    /// non-empty of the three.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_hours: Option<f64>,
}

impl WorkflowStep {
    /// An approval step with a role and an SLA.
    pub fn approval(role: impl Into<String>, sla_hours: f64) -> Self {
        Self {
            kind: StepKind::Approval,
            role: Some(role.into()),
            assignee_role: None,
            owner_role: None,
            sla_hours: Some(sla_hours),
            delay_hours: None,
        }
    }

    /// An approval step with no role or SLA declared.
    pub fn bare_approval() -> Self {
        Self {
            kind: StepKind::Approval,
            role: None,
            assignee_role: None,
            owner_role: None,
            sla_hours: None,
            delay_hours: None,
        }
    }

    /// A delay step of the given duration.
    pub fn delay(delay_hours: f64) -> Self {
        Self {
            kind: StepKind::Delay,
            role: None,
            assignee_role: None,
            owner_role: None,
            sla_hours: None,
            delay_hours: Some(delay_hours),
        }
    }

    /// A delay step with no numeric duration.
    pub fn bare_delay() -> Self {
        Self {
            kind: StepKind::Delay,
            role: None,
            assignee_role: None,
            owner_role: None,
            sla_hours: None,
            delay_hours: None,
        }
    }

    /// A step with an arbitrary tag (`task`, `notify`, ...).
    pub fn other(tag: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Other(tag.into()),
            role: None,
            assignee_role: None,
            owner_role: None,
            sla_hours: None,
            delay_hours: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn is_approval(&self) -> bool {
        self.kind == StepKind::Approval
    }

    pub fn is_delay(&self) -> bool {
        self.kind == StepKind::Delay
    }

    /// First non-empty of `role` / `assignee_role` / `owner_role`.
    pub fn effective_role(&self) -> Option<&str> {
        [&self.role, &self.assignee_role, &self.owner_role]
            .into_iter()
            .filter_map(|r| r.as_deref())
            .map(str::trim)
            .find(|r| !r.is_empty())
    }

    /// Largest duration this step declares, if any.
    pub fn declared_hours(&self) -> Option<f64> {
        match (self.sla_hours, self.delay_hours) {
            (Some(s), Some(d)) => Some(s.max(d)),
            (Some(s), None) => Some(s),
            (None, Some(d)) => Some(d),
            (None, None) => None,
        }
    }
}
