//! The health evaluator: workflow document → governance health.
//!
//! Evaluation is a pure function of the document and the clock. It
//! never fails — malformed or missing fields degrade to defaults and
//! show up as non-compliance, not as errors.

use chrono::{DateTime, Utc};
use tracing::debug;

use governance_types::{GovernanceHealth, Issue, Severity, WorkflowDocument};

use crate::normalize::{normalize, StepAggregates};
use crate::rules::{standard_rules, RuleContext, TierRule};

/// Score deducted per issue severity. Errors must cost more than
/// warns; info costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub error: u32,
    pub warn: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            error: 40,
            warn: 15,
        }
    }
}

/// Runs the registered tier rules over a workflow document and scores
/// the result.
pub struct HealthEvaluator {
    rules: Vec<Box<dyn TierRule>>,
    weights: ScoreWeights,
}

impl HealthEvaluator {
    /// Evaluator with the standard rule set and default weights.
    pub fn new() -> Self {
        Self {
            rules: standard_rules(),
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Evaluate, stamping the current time.
    pub fn evaluate(&self, document: &WorkflowDocument) -> GovernanceHealth {
        self.evaluate_at(document, Utc::now())
    }

    /// Evaluate with an explicit timestamp. Given identical input and
    /// timestamp the result is identical — the persistence layer and
    /// tests rely on this.
    pub fn evaluate_at(
        &self,
        document: &WorkflowDocument,
        now: DateTime<Utc>,
    ) -> GovernanceHealth {
        let workflow = normalize(document);
        let aggregates = StepAggregates::from_steps(&workflow.steps);
        let ctx = RuleContext {
            workflow: &workflow,
            aggregates: &aggregates,
        };

        let mut issues = Vec::new();
        for rule in &self.rules {
            match rule.check(&ctx) {
                Some(issue) => {
                    debug!(
                        rule = rule.name(),
                        code = %issue.code,
                        severity = ?issue.severity,
                        "rule violated"
                    );
                    issues.push(issue);
                }
                None => debug!(rule = rule.name(), "rule holds"),
            }
        }

        let score = self.score(&issues);
        GovernanceHealth::new(score, issues, now)
    }

    fn score(&self, issues: &[Issue]) -> u8 {
        let deducted: u32 = issues
            .iter()
            .map(|i| match i.severity {
                Severity::Error => self.weights.error,
                Severity::Warn => self.weights.warn,
                Severity::Info => 0,
            })
            .sum();
        100_u32.saturating_sub(deducted) as u8
    }
}

impl Default for HealthEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
