//! Automation settings: lazy defaults, wholesale replacement.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use governance_store::SettingsStore;
use governance_types::{AutomationSettings, BusinessId, EscalationRules, ViolationType};

use crate::error::ServiceResult;

/// A full replacement for a business's automation settings. Updates
/// always supply the complete map and rules — there is no merge.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub auto_remediate: HashMap<ViolationType, bool>,
    pub escalation_rules: EscalationRules,
}

pub(crate) struct SettingsService {
    settings: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Read the settings, creating and persisting safe defaults on
    /// first access.
    pub async fn get(&self, business_id: &BusinessId) -> ServiceResult<AutomationSettings> {
        if let Some(settings) = self.settings.get(business_id).await? {
            return Ok(settings);
        }
        let defaults = AutomationSettings::defaults(business_id.clone());
        self.settings.put(defaults.clone()).await?;
        Ok(defaults)
    }

    /// Replace the settings record wholesale.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        business_id: &BusinessId,
        update: SettingsUpdate,
    ) -> ServiceResult<AutomationSettings> {
        let settings = AutomationSettings {
            business_id: business_id.clone(),
            auto_remediate: update.auto_remediate,
            escalation_rules: update.escalation_rules,
            updated_at: Utc::now(),
        };
        self.settings.put(settings.clone()).await?;
        Ok(settings)
    }
}
