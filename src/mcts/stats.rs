//! Counters a search keeps about its own work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Running totals for one `MCTSSearch`, cleared by `reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations that backpropagated a value.
    pub iterations: u32,

    /// Iterations abandoned because the root had no children to simulate.
    pub aborted: u32,

    /// Nodes whose children were generated.
    pub nodes_expanded: u32,

    /// Random rollouts played.
    pub simulations: u32,

    /// Deepest child created so far.
    pub max_depth: u16,

    /// Wall-clock time inside `search`, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_expansion(&mut self, child_depth: u16) {
        self.nodes_expanded += 1;
        self.max_depth = self.max_depth.max(child_depth);
    }

    pub(crate) fn record_simulation(&mut self) {
        self.simulations += 1;
    }

    pub(crate) fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn record_abort(&mut self) {
        self.aborted += 1;
    }

    pub(crate) fn record_elapsed(&mut self, elapsed: Duration) {
        self.time_us = self
            .time_us
            .saturating_add(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX));
    }

    /// Completed iterations per wall-clock second (0 before any timing).
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) * 1e6 / self.time_us as f64
        }
    }

    /// Share of `select_action` calls that aborted.
    #[must_use]
    pub fn abort_rate(&self) -> f64 {
        let attempts = self.iterations + self.aborted;
        if attempts == 0 {
            0.0
        } else {
            f64::from(self.aborted) / f64::from(attempts)
        }
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iterations ({} aborted), {} simulations, {} expansions, depth {}, {:.0} it/s",
            self.iterations,
            self.aborted,
            self.simulations,
            self.nodes_expanded,
            self.max_depth,
            self.iterations_per_second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_tracks_deepest_child() {
        let mut stats = SearchStats::default();
        stats.record_expansion(3);
        stats.record_expansion(1);
        assert_eq!(stats.nodes_expanded, 2);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_rates() {
        let mut stats = SearchStats::default();
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.abort_rate(), 0.0);

        for _ in 0..3 {
            stats.record_iteration();
        }
        stats.record_abort();
        stats.record_elapsed(Duration::from_millis(500));

        assert_eq!(stats.time_us, 500_000);
        assert_eq!(stats.iterations_per_second(), 6.0);
        assert_eq!(stats.abort_rate(), 0.25);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = SearchStats::default();
        stats.record_iteration();
        stats.record_simulation();
        stats.record_abort();
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_display() {
        let stats = SearchStats {
            iterations: 10,
            aborted: 1,
            simulations: 9,
            nodes_expanded: 4,
            max_depth: 2,
            time_us: 0,
        };
        assert_eq!(
            stats.to_string(),
            "10 iterations (1 aborted), 9 simulations, 4 expansions, depth 2, 0 it/s"
        );
    }

    #[test]
    fn test_serialization() {
        let mut stats = SearchStats::default();
        stats.record_iteration();
        stats.record_expansion(5);

        let json = serde_json::to_string(&stats).unwrap();
        let back: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
