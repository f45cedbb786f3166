use srccmp_common::Status;

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
    /// Pairings that produced a report line
    pub listed: usize,
    /// Primary candidates after extension filtering
    pub total: usize,
}

impl RunStatistics {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Match => self.matched += 1,
            Status::ContentMismatch => self.mismatched += 1,
            Status::Missing => self.missing += 1,
        }
    }

    pub fn record_listed(&mut self) {
        self.listed += 1;
    }

    pub fn compared(&self) -> usize {
        self.matched + self.mismatched + self.missing
    }

    /// `count * 100 / total`, truncated. Categories need not sum to 100.
    pub fn percent(&self, count: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        count * 100 / self.total
    }

    pub fn all_matched(&self) -> bool {
        self.matched == self.compared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_truncate() {
        let mut stats = RunStatistics::new(3);
        stats.record(Status::Match);
        stats.record(Status::ContentMismatch);
        stats.record(Status::Missing);

        assert_eq!(stats.percent(stats.matched), 33);
        assert_eq!(stats.percent(stats.mismatched), 33);
        assert_eq!(stats.percent(stats.missing), 33);
        assert_eq!(stats.compared(), 3);
        assert_eq!(stats.percent(stats.compared()), 100);
        assert!(!stats.all_matched());
    }

    #[test]
    fn test_zero_total() {
        let stats = RunStatistics::new(0);
        assert_eq!(stats.percent(0), 0);
        assert!(stats.all_matched());
    }

    #[test]
    fn test_listed_is_independent_of_status_counts() {
        let mut stats = RunStatistics::new(2);
        stats.record(Status::Match);
        stats.record(Status::Match);
        stats.record_listed();

        assert_eq!(stats.matched, 2);
        assert_eq!(stats.listed, 1);
        assert_eq!(stats.percent(stats.listed), 50);
        assert!(stats.all_matched());
    }
}
