use triage_core::{Priority, RuleThresholds};

/// Maps an order amount to a priority level
#[derive(Debug, Clone, Copy)]
pub struct PriorityRule {
    threshold: f64,
}

impl PriorityRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_thresholds(thresholds: &RuleThresholds) -> Self {
        Self::new(thresholds.high_priority_amount)
    }

    /// High when the amount is strictly above the threshold.
    ///
    /// Plain float comparison: NaN is never above anything, +inf always is.
    pub fn determine(&self, amount: f64) -> Priority {
        if amount > self.threshold {
            Priority::High
        } else {
            Priority::Low
        }
    }
}

impl Default for PriorityRule {
    fn default() -> Self {
        Self::from_thresholds(&RuleThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_strict() {
        let rule = PriorityRule::default();
        assert_eq!(rule.determine(200.0), Priority::Low);
        // Rounds to exactly 200.0
        assert_eq!(rule.determine(200.00000000000001), Priority::Low);
        assert_eq!(rule.determine(200.00000000000003), Priority::High);
        assert_eq!(rule.determine(200.01), Priority::High);
        assert_eq!(rule.determine(250.0), Priority::High);
    }

    #[test]
    fn test_low_amounts() {
        let rule = PriorityRule::default();
        assert_eq!(rule.determine(0.0), Priority::Low);
        assert_eq!(rule.determine(-100.0), Priority::Low);
        assert_eq!(rule.determine(199.99), Priority::Low);
    }

    #[test]
    fn test_non_finite_amounts() {
        let rule = PriorityRule::default();
        assert_eq!(rule.determine(f64::NAN), Priority::Low);
        assert_eq!(rule.determine(f64::INFINITY), Priority::High);
        assert_eq!(rule.determine(f64::NEG_INFINITY), Priority::Low);
        assert_eq!(rule.determine(f64::MAX), Priority::High);
    }

    #[test]
    fn test_custom_threshold() {
        let rule = PriorityRule::new(10.0);
        assert_eq!(rule.determine(10.5), Priority::High);
        assert_eq!(rule.determine(10.0), Priority::Low);
    }
}
