//! Owned chart state for the daily-counts bar chart.
//!
//! The chart is rebuilt from scratch on every snapshot: `ChartSlot` holds at
//! most one live `ChartInstance` and disposes the previous one before
//! installing its replacement. The slot is owned by the dashboard view, so
//! there is no module-level chart state anywhere.

/// Immutable, prepared data for one single-series bar chart render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartInstance {
    bars: Vec<(String, u64)>,
    y_max: u64,
    generation: u64,
}

impl ChartInstance {
    /// Bars in display order, label and value per entry.
    pub fn bars(&self) -> &[(String, u64)] {
        &self.bars
    }

    /// Upper bound of the zero-based y-axis.
    pub fn y_max(&self) -> u64 {
        self.y_max
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Which rebuild produced this instance. Strictly increasing per slot.
    #[allow(dead_code)] // exercised by the slot discipline tests
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holder enforcing the at-most-one-live-chart rule for one screen region.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartInstance>,
    generations: u64,
    disposed: u64,
}

impl ChartSlot {
    /// Dispose the live instance (if any) and install a fresh one built from
    /// positionally paired labels and values.
    ///
    /// Mismatched lengths are a caller contract violation, not a runtime
    /// condition this slot recovers from.
    pub fn replace(&mut self, labels: Vec<String>, values: Vec<u64>) -> &ChartInstance {
        assert_eq!(
            labels.len(),
            values.len(),
            "chart labels and values must pair up"
        );

        if let Some(old) = self.current.take() {
            self.disposed += 1;
            drop(old);
        }

        self.generations += 1;
        let y_max = values.iter().copied().max().unwrap_or(0);
        let bars = labels.into_iter().zip(values).collect();
        self.current.insert(ChartInstance {
            bars,
            y_max,
            generation: self.generations,
        })
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.current.as_ref()
    }

    /// How many prior instances have been torn down over this slot's life.
    #[allow(dead_code)] // exercised by the slot discipline tests
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    #[allow(dead_code)] // exercised by the slot discipline tests
    pub fn live_count(&self) -> usize {
        usize::from(self.current.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<String>, Vec<u64>) {
        (
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            vec![5, 3],
        )
    }

    #[test]
    fn test_replace_builds_bars_in_order() {
        let mut slot = ChartSlot::default();
        let (labels, values) = sample();
        let chart = slot.replace(labels, values);
        assert_eq!(
            chart.bars(),
            &[("2024-01-01".to_string(), 5), ("2024-01-02".to_string(), 3)]
        );
        assert_eq!(chart.y_max(), 5);
    }

    #[test]
    fn test_first_replace_disposes_nothing() {
        let mut slot = ChartSlot::default();
        let (labels, values) = sample();
        slot.replace(labels, values);
        assert_eq!(slot.disposed_count(), 0);
        assert_eq!(slot.live_count(), 1);
    }

    #[test]
    fn test_each_rebuild_disposes_exactly_one() {
        let mut slot = ChartSlot::default();
        for round in 1..=4u64 {
            let (labels, values) = sample();
            let chart = slot.replace(labels, values);
            assert_eq!(chart.generation(), round);
            assert_eq!(slot.live_count(), 1);
            assert_eq!(slot.disposed_count(), round - 1);
        }
    }

    #[test]
    fn test_same_input_twice_renders_identically() {
        let mut slot = ChartSlot::default();
        let (labels, values) = sample();
        let first = slot.replace(labels.clone(), values.clone()).bars().to_vec();
        let second = slot.replace(labels, values).bars().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_chart_has_zero_axis() {
        let mut slot = ChartSlot::default();
        let chart = slot.replace(Vec::new(), Vec::new());
        assert!(chart.is_empty());
        assert_eq!(chart.y_max(), 0);
    }

    #[test]
    #[should_panic(expected = "must pair up")]
    fn test_mismatched_lengths_panic() {
        let mut slot = ChartSlot::default();
        slot.replace(vec!["a".to_string()], vec![1, 2]);
    }
}
