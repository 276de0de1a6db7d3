//! Aggregate outcome records for directory-mode processing.

use serde::Serialize;

/// Success/failure counts produced by the directory fan-out coordinator.
///
/// `succeeded + failed` always equals the number of regular files that were
/// discovered in the input directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files whose transform completed and whose output was written.
    pub succeeded: usize,
    /// Files whose transform or write failed.
    pub failed: usize,
}

impl Summary {
    /// Total number of files the coordinator attempted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Whether every attempted file succeeded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_follow_the_counts() {
        let summary = Summary {
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(summary.total(), 3);
        assert!(!summary.is_clean());
        assert!(Summary::default().is_clean());
    }

    #[test]
    fn summary_serialises_to_plain_counts() -> anyhow::Result<()> {
        let summary = Summary {
            succeeded: 2,
            failed: 1,
        };
        let value = serde_json::to_value(summary)?;
        assert_eq!(value, serde_json::json!({ "succeeded": 2, "failed": 1 }));
        Ok(())
    }
}
