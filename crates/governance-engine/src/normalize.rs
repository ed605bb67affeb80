//! Normalization: heterogeneous workflow documents → one strict shape.
//!
//! The CRUD layer stores workflows in several shapes (`steps` vs
//! `pipeline`, tier on the record, in metadata, or on `business_tier`).
//! All duck-typing is confined to this adapter; every rule runs against
//! [`NormalizedWorkflow`] only.

use governance_types::{Tier, WorkflowDocument, WorkflowStep};

/// The strict internal workflow shape the rule set evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWorkflow {
    pub tier: Tier,
    pub steps: Vec<WorkflowStep>,
    pub human_review_required: bool,
    pub description: Option<String>,
}

/// Aggregates derived from the step sequence, computed once per
/// evaluation and shared by every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct StepAggregates {
    pub approval_count: usize,
    pub delay_count: usize,
    pub any_role: bool,
    pub any_sla: bool,
    /// Max of all declared `sla_hours`/`delay_hours`; 1.0 as a soft
    /// heuristic when delay-typed steps exist with no numeric hours;
    /// 0.0 when nothing declares a duration.
    pub effective_sla_hours: f64,
}

impl StepAggregates {
    pub fn from_steps(steps: &[WorkflowStep]) -> Self {
        let approval_count = steps.iter().filter(|s| s.is_approval()).count();
        let delay_count = steps.iter().filter(|s| s.is_delay()).count();
        let any_role = steps.iter().any(|s| s.effective_role().is_some());
        let any_sla = steps.iter().any(|s| s.declared_hours().is_some());

        let max_declared = steps
            .iter()
            .filter_map(WorkflowStep::declared_hours)
            .fold(0.0_f64, f64::max);
        let effective_sla_hours = if max_declared > 0.0 {
            max_declared
        } else if delay_count > 0 {
            1.0
        } else {
            0.0
        };

        Self {
            approval_count,
            delay_count,
            any_role,
            any_sla,
            effective_sla_hours,
        }
    }

    /// Whether the workflow declares any SLA signal at all — numeric
    /// hours on any step, or the mere presence of a delay step.
    pub fn has_sla_signal(&self) -> bool {
        self.any_sla || self.delay_count > 0
    }
}

/// Resolve a heterogeneous document into the strict internal shape.
///
/// Tier resolution: `tier` → `metadata.tier` → `business_tier`, first
/// parseable value wins, defaulting to [`Tier::Startup`]. Steps:
/// `steps` if non-empty, else `pipeline`, else empty. A whitespace-only
/// description is treated as absent. Never fails — malformed fields
/// degrade to defaults.
pub fn normalize(document: &WorkflowDocument) -> NormalizedWorkflow {
    let tier = [
        document.tier.as_deref(),
        document.metadata_tier(),
        document.business_tier.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(Tier::parse)
    .unwrap_or_default();

    let steps = [&document.steps, &document.pipeline]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default();

    let description = document
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);

    NormalizedWorkflow {
        tier,
        steps,
        human_review_required: document.mmr_required.unwrap_or(false)
            || document.require_human_review.unwrap_or(false),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_defaults_to_startup() {
        let normalized = normalize(&WorkflowDocument::new());
        assert_eq!(normalized.tier, Tier::Startup);
    }

    #[test]
    fn tier_field_wins_over_metadata_and_business_tier() {
        let doc = WorkflowDocument::new()
            .with_tier("enterprise")
            .with_metadata("tier", "sme")
            .with_business_tier("startup");
        assert_eq!(normalize(&doc).tier, Tier::Enterprise);
    }

    #[test]
    fn unparseable_tier_falls_through_the_chain() {
        let doc = WorkflowDocument::new()
            .with_tier("platinum")
            .with_metadata("tier", "sme");
        assert_eq!(normalize(&doc).tier, Tier::Sme);

        let doc = WorkflowDocument::new()
            .with_tier("platinum")
            .with_business_tier("solopreneur");
        assert_eq!(normalize(&doc).tier, Tier::Solopreneur);
    }

    #[test]
    fn steps_win_over_pipeline_when_non_empty() {
        let doc = WorkflowDocument::new()
            .with_steps(vec![WorkflowStep::bare_approval()])
            .with_pipeline(vec![WorkflowStep::bare_delay(), WorkflowStep::bare_delay()]);
        assert_eq!(normalize(&doc).steps.len(), 1);
    }

    #[test]
    fn empty_steps_fall_back_to_pipeline() {
        let doc = WorkflowDocument::new()
            .with_steps(Vec::new())
            .with_pipeline(vec![WorkflowStep::bare_delay()]);
        assert_eq!(normalize(&doc).steps.len(), 1);
    }

    #[test]
    fn missing_sequences_normalize_to_empty() {
        assert!(normalize(&WorkflowDocument::new()).steps.is_empty());
    }

    #[test]
    fn whitespace_description_is_absent() {
        let doc = WorkflowDocument::new().with_description("   ");
        assert_eq!(normalize(&doc).description, None);

        let doc = WorkflowDocument::new().with_description("  payroll run  ");
        assert_eq!(normalize(&doc).description.as_deref(), Some("payroll run"));
    }

    #[test]
    fn either_review_flag_requires_human_review() {
        let doc = WorkflowDocument::new().with_mmr_required(true);
        assert!(normalize(&doc).human_review_required);

        let doc = WorkflowDocument::new().with_human_review(true);
        assert!(normalize(&doc).human_review_required);

        assert!(!normalize(&WorkflowDocument::new()).human_review_required);
    }

    #[test]
    fn effective_sla_is_the_max_declared() {
        let agg = StepAggregates::from_steps(&[
            WorkflowStep::approval("admin", 24.0),
            WorkflowStep::delay(72.0),
            WorkflowStep::approval("lead", 48.0),
        ]);
        assert_eq!(agg.effective_sla_hours, 72.0);
        assert_eq!(agg.approval_count, 2);
        assert_eq!(agg.delay_count, 1);
        assert!(agg.any_role);
        assert!(agg.any_sla);
    }

    #[test]
    fn bare_delay_steps_get_the_soft_one_hour_heuristic() {
        let agg = StepAggregates::from_steps(&[WorkflowStep::bare_delay()]);
        assert!(!agg.any_sla);
        assert!(agg.has_sla_signal());
        assert_eq!(agg.effective_sla_hours, 1.0);
    }

    #[test]
    fn no_steps_means_no_sla_signal() {
        let agg = StepAggregates::from_steps(&[]);
        assert!(!agg.has_sla_signal());
        assert_eq!(agg.effective_sla_hours, 0.0);
    }
}
