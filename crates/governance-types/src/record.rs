//! Persisted workflow and business records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::WorkflowDocument;
use crate::health::GovernanceHealth;
use crate::ids::{BusinessId, WorkflowId};
use crate::tier::Tier;

/// A workflow record: the CRUD-layer document plus the governance
/// fields this system owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub id: WorkflowId,
    pub business_id: BusinessId,
    pub name: String,
    /// Region doubles as a department proxy in trend reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub document: WorkflowDocument,
    /// Overwritten in place by enforcement; absent until the first
    /// enforcement run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_health: Option<GovernanceHealth>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    pub fn new(
        business_id: BusinessId,
        name: impl Into<String>,
        document: WorkflowDocument,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: WorkflowId::generate(),
            business_id,
            name: name.into(),
            region: None,
            document,
            governance_health: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// A business (tenant) record. Only the fields governance consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: BusinessId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl BusinessRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BusinessId::generate(),
            name: name.into(),
            tier: None,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }
}
