//! Governance score trend aggregation.
//!
//! Works entirely off the structured issue codes carried by persisted
//! health — no text matching against rendered messages.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::instrument;

use governance_store::WorkflowStore;
use governance_types::{BusinessId, ViolationType};

use crate::error::ServiceResult;

/// One point of the synthetic history series.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub weeks_ago: usize,
    pub score: f64,
}

/// Aggregate for one department (region proxy).
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentTrend {
    pub department: String,
    pub workflows: usize,
    pub average_score: f64,
    pub compliant: usize,
}

/// Current compliance picture for a business.
#[derive(Debug, Clone, Serialize)]
pub struct GovernanceScoreTrend {
    pub business_id: BusinessId,
    pub total_workflows: usize,
    /// Workflows that have been enforced at least once.
    pub evaluated_workflows: usize,
    pub compliant_workflows: usize,
    pub compliance_rate: f64,
    pub average_score: f64,
    /// Issue counts bucketed by violation type, across all current
    /// issues that map to one.
    pub violation_counts: HashMap<ViolationType, usize>,
    pub by_department: Vec<DepartmentTrend>,
    /// Synthetic weekly series: random jitter around the current
    /// average, oldest first. A placeholder — not derived from stored
    /// snapshots.
    pub history: Vec<TrendPoint>,
}

pub(crate) struct TrendService {
    workflows: Arc<dyn WorkflowStore>,
    compliance_threshold: u8,
    trend_weeks: usize,
    trend_jitter: f64,
}

struct DepartmentAccumulator {
    workflows: usize,
    score_sum: f64,
    scored: usize,
    compliant: usize,
}

impl TrendService {
    pub fn new(
        workflows: Arc<dyn WorkflowStore>,
        compliance_threshold: u8,
        trend_weeks: usize,
        trend_jitter: f64,
    ) -> Self {
        Self {
            workflows,
            compliance_threshold,
            trend_weeks,
            trend_jitter,
        }
    }

    #[instrument(skip(self))]
    pub async fn trend(&self, business_id: &BusinessId) -> ServiceResult<GovernanceScoreTrend> {
        let workflows = self.workflows.list_for_business(business_id).await?;

        let mut score_sum = 0.0_f64;
        let mut evaluated = 0usize;
        let mut compliant = 0usize;
        let mut violation_counts: HashMap<ViolationType, usize> = HashMap::new();
        let mut departments: BTreeMap<String, DepartmentAccumulator> = BTreeMap::new();

        for workflow in &workflows {
            let department = workflow
                .region
                .clone()
                .unwrap_or_else(|| "general".to_string());
            let bucket = departments
                .entry(department)
                .or_insert_with(|| DepartmentAccumulator {
                    workflows: 0,
                    score_sum: 0.0,
                    scored: 0,
                    compliant: 0,
                });
            bucket.workflows += 1;

            let Some(health) = &workflow.governance_health else {
                continue;
            };
            evaluated += 1;
            score_sum += f64::from(health.score);
            bucket.score_sum += f64::from(health.score);
            bucket.scored += 1;
            if health.is_compliant(self.compliance_threshold) {
                compliant += 1;
                bucket.compliant += 1;
            }
            for issue in &health.issues {
                if let Some(violation) = issue.code.violation_type() {
                    *violation_counts.entry(violation).or_default() += 1;
                }
            }
        }

        let average_score = if evaluated > 0 {
            score_sum / evaluated as f64
        } else {
            0.0
        };
        let compliance_rate = if workflows.is_empty() {
            0.0
        } else {
            compliant as f64 / workflows.len() as f64
        };

        let by_department = departments
            .into_iter()
            .map(|(department, acc)| DepartmentTrend {
                department,
                workflows: acc.workflows,
                average_score: if acc.scored > 0 {
                    acc.score_sum / acc.scored as f64
                } else {
                    0.0
                },
                compliant: acc.compliant,
            })
            .collect();

        Ok(GovernanceScoreTrend {
            business_id: business_id.clone(),
            total_workflows: workflows.len(),
            evaluated_workflows: evaluated,
            compliant_workflows: compliant,
            compliance_rate,
            average_score,
            violation_counts,
            by_department,
            history: self.synthetic_history(average_score),
        })
    }

    fn synthetic_history(&self, around: f64) -> Vec<TrendPoint> {
        let mut rng = rand::thread_rng();
        (0..self.trend_weeks)
            .rev()
            .map(|weeks_ago| {
                let jitter = if self.trend_jitter > 0.0 {
                    rng.gen_range(-self.trend_jitter..=self.trend_jitter)
                } else {
                    0.0
                };
                TrendPoint {
                    weeks_ago,
                    score: (around + jitter).clamp(0.0, 100.0),
                }
            })
            .collect()
    }
}
