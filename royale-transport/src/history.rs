//! Population time series: per-kind counts and percentage shares per tick.

use royale_simulation::{Kind, PopulationCounts};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySample {
    pub tick: u64,
    pub counts: PopulationCounts,
}

/// Accumulates counts over a run. The engine keeps no history of its own.
#[derive(Debug, Default, Clone)]
pub struct PopulationHistory {
    samples: Vec<HistorySample>,
    leader: Option<Kind>,
    lead_changes: usize,
}

impl PopulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: u64, counts: PopulationCounts) {
        if let Some(leader) = counts.leader() {
            if self.leader.map_or(false, |previous| previous != leader) {
                self.lead_changes += 1;
            }
            self.leader = Some(leader);
        }
        self.samples.push(HistorySample { tick, counts });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    pub fn count_series(&self, kind: Kind) -> Vec<usize> {
        self.samples.iter().map(|s| s.counts.get(kind)).collect()
    }

    /// Percentage of the population held by `kind` at each sample.
    pub fn share_series(&self, kind: Kind) -> Vec<f32> {
        self.samples
            .iter()
            .map(|s| s.counts.shares()[kind.index()])
            .collect()
    }

    /// Largest count `kind` ever reached and the first tick it was reached at.
    pub fn peak(&self, kind: Kind) -> Option<(u64, usize)> {
        self.samples
            .iter()
            .map(|s| (s.tick, s.counts.get(kind)))
            .fold(None, |best, (tick, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((tick, count)),
            })
    }

    /// How many times the most numerous kind changed between samples.
    pub fn lead_changes(&self) -> usize {
        self.lead_changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(rows: &[[usize; 3]]) -> PopulationHistory {
        let mut history = PopulationHistory::new();
        for (tick, row) in rows.iter().enumerate() {
            history.record(tick as u64, PopulationCounts::from_array(*row));
        }
        history
    }

    #[test]
    fn shares_sum_to_one_hundred_every_sample() {
        let history = history(&[[20, 20, 20], [25, 15, 20], [10, 10, 40]]);
        for i in 0..history.len() {
            let total: f32 = Kind::ALL.iter().map(|&k| history.share_series(k)[i]).sum();
            assert!((total - 100.0).abs() < 1e-3);
        }
        assert_eq!(history.count_series(Kind::Scissors), vec![20, 20, 40]);
    }

    #[test]
    fn lead_changes_count_switches_of_leader() {
        let history = history(&[[5, 1, 1], [1, 5, 1], [1, 6, 0], [0, 1, 6]]);
        assert_eq!(history.lead_changes(), 2);
    }

    #[test]
    fn peak_reports_first_tick_of_maximum() {
        let history = history(&[[1, 3, 2], [1, 4, 1], [0, 4, 2]]);
        assert_eq!(history.peak(Kind::Paper), Some((1, 4)));
        assert_eq!(history.peak(Kind::Rock), Some((0, 1)));
        assert_eq!(PopulationHistory::new().peak(Kind::Rock), None);
    }

    #[test]
    fn latest_is_last_recorded_sample() {
        let history = history(&[[1, 1, 1], [0, 3, 0]]);
        assert_eq!(history.latest().unwrap().counts.as_array(), [0, 3, 0]);
        assert!(!history.is_empty());
    }
}
