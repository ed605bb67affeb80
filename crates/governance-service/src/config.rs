//! Service configuration.

/// Tunables for the governance service.
#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    /// Score at or above which a workflow counts as compliant.
    pub compliance_threshold: u8,

    /// Number of weekly points in the synthetic trend history.
    pub trend_weeks: usize,

    /// Maximum jitter, in score points, applied to synthetic trend
    /// points.
    pub trend_jitter: f64,

    /// Capacity of the service event broadcast channel.
    pub event_capacity: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            compliance_threshold: 80,
            trend_weeks: 12,
            trend_jitter: 6.0,
            event_capacity: 1024,
        }
    }
}
