//! The heterogeneous workflow record shape supplied by the CRUD layer.
//!
//! Producers disagree on field names: some write `steps`, others
//! `pipeline`; the tier may live on the record, in `metadata`, or on a
//! `business_tier` field. This type preserves all of those shapes;
//! the engine's normalizer resolves them into one strict form before
//! any rule runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::step::WorkflowStep;

/// A workflow definition as stored by the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<WorkflowStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Vec<WorkflowStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmr_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_human_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl WorkflowDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    pub fn with_business_tier(mut self, tier: impl Into<String>) -> Self {
        self.business_tier = Some(tier.into());
        self
    }

    pub fn with_steps(mut self, steps: Vec<WorkflowStep>) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_pipeline(mut self, pipeline: Vec<WorkflowStep>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mmr_required(mut self, required: bool) -> Self {
        self.mmr_required = Some(required);
        self
    }

    pub fn with_human_review(mut self, required: bool) -> Self {
        self.require_human_review = Some(required);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), value);
        }
        self
    }

    /// Tier string stashed in the metadata map, if any.
    pub fn metadata_tier(&self) -> Option<&str> {
        self.metadata.get("tier").and_then(|v| v.as_str())
    }
}
