//! Pure governance logic: normalization, tier rules, health
//! evaluation, and remediation planning.
//!
//! Nothing in this crate performs I/O. The evaluator is a pure
//! function of (document, clock); the remediation planner mutates a
//! step list it is handed and reports what it did. Persistence and
//! orchestration live in `governance-service`.
//!
//! # Example
//!
//! ```rust
//! use governance_engine::HealthEvaluator;
//! use governance_types::{WorkflowDocument, WorkflowStep};
//!
//! let document = WorkflowDocument::new()
//!     .with_tier("enterprise")
//!     .with_steps(vec![WorkflowStep::approval("admin", 48.0)]);
//!
//! let health = HealthEvaluator::new().evaluate(&document);
//! assert!(health.score <= 60); // second approval still missing
//! ```

#![deny(unsafe_code)]

pub mod evaluator;
pub mod normalize;
pub mod remediation;
pub mod rules;

pub use evaluator::{HealthEvaluator, ScoreWeights};
pub use normalize::{normalize, NormalizedWorkflow, StepAggregates};
pub use remediation::{plan_remediation, RemediationAction};
pub use rules::{standard_rules, RuleContext, TierRule};
