use serde::Deserialize;

/// Aggregate counts shown on the admin dashboard. Missing counters read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub patients: u64,
    #[serde(default)]
    pub departments: u64,
    #[serde(default, alias = "total_tickets")]
    pub tickets: u64,
    #[serde(default)]
    pub casual_workers: u64,
    #[serde(default, alias = "open_tickets")]
    pub pending: u64,
    #[serde(default)]
    pub assigned: u64,
    #[serde(default, alias = "closed_tickets")]
    pub resolved: u64,
}

impl AdminStats {
    /// Newer backends only report totals, so in-progress is derived.
    pub fn in_progress(&self) -> u64 {
        if self.assigned > 0 {
            self.assigned
        } else {
            self.tickets
                .saturating_sub(self.pending)
                .saturating_sub(self.resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_in_progress_from_totals() {
        let stats: AdminStats = serde_json::from_str(
            r#"{"total_tickets": 10, "open_tickets": 4, "closed_tickets": 5}"#,
        )
        .unwrap();
        assert_eq!(stats.in_progress(), 1);
        assert_eq!(stats.patients, 0);
    }

    #[test]
    fn prefers_reported_assigned_count() {
        let stats: AdminStats =
            serde_json::from_str(r#"{"tickets": 9, "pending": 2, "assigned": 3, "resolved": 4}"#)
                .unwrap();
        assert_eq!(stats.in_progress(), 3);
    }
}
