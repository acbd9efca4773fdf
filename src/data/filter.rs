use super::model::{LaunchDataset, LaunchRecord, SiteSelection};

// ---------------------------------------------------------------------------
// PayloadRange – the numeric filter control
// ---------------------------------------------------------------------------

/// Inclusive payload interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Normalize a pair of slider values against the dataset bounds:
    /// order them, then clamp both ends into `[min, max]`.
    pub fn clamped(low: f64, high: f64, bounds: (f64, f64)) -> Self {
        let (mut low, mut high) = if low <= high { (low, high) } else { (high, low) };
        low = low.clamp(bounds.0, bounds.1);
        high = high.clamp(bounds.0, bounds.1);
        PayloadRange { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.low && payload_kg <= self.high
    }

    /// A well-formed range never has `low > high`; the UI keeps this true,
    /// the query engine still checks it.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }
}

// ---------------------------------------------------------------------------
// FilterState – both control values
// ---------------------------------------------------------------------------

/// The two current control values. Owned and mutated by the UI layer; the
/// core only reads it (and supplies the normalization helpers below).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            selected_site: SiteSelection::All,
            payload_range: PayloadRange::new(0.0, 0.0),
        }
    }
}

impl FilterState {
    /// Initial state for a freshly loaded dataset: all sites, full bounds.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (min, max) = dataset.payload_bounds();
        FilterState {
            selected_site: SiteSelection::All,
            payload_range: PayloadRange::new(min, max),
        }
    }

    /// The single subset predicate: site matches and payload in range.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.selected_site.matches(&record.site) && self.payload_range.contains(record.payload_kg)
    }
}

/// Return indices of records that pass the current filters.
pub fn filtered_indices(dataset: &LaunchDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;
    use std::collections::BTreeMap;

    fn dataset() -> LaunchDataset {
        let record = |site: &str, payload: f64, outcome| LaunchRecord {
            site: site.to_string(),
            payload_kg: payload,
            outcome,
            booster_category: "FT".to_string(),
            extra: BTreeMap::new(),
        };
        LaunchDataset::from_records(vec![
            record("A", 400.0, Outcome::Success),
            record("A", 1000.0, Outcome::Failure),
            record("B", 2000.0, Outcome::Success),
        ])
        .unwrap()
    }

    #[test]
    fn full_bounds_include_every_record() {
        let ds = dataset();
        let filters = FilterState::full(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn every_match_satisfies_both_constraints() {
        let ds = dataset();
        let filters = FilterState {
            selected_site: SiteSelection::Site("A".into()),
            payload_range: PayloadRange::new(500.0, 1500.0),
        };
        let indices = filtered_indices(&ds, &filters);
        assert_eq!(indices, vec![1]);
        for (i, rec) in ds.records().iter().enumerate() {
            let inside = indices.contains(&i);
            assert_eq!(inside, filters.matches(rec));
        }
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = PayloadRange::new(400.0, 2000.0);
        assert!(range.contains(400.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(399.9));
        assert!(!range.contains(2000.1));
    }

    #[test]
    fn clamped_orders_and_bounds_the_pair() {
        let range = PayloadRange::clamped(5000.0, 100.0, (400.0, 2000.0));
        assert_eq!(range, PayloadRange::new(400.0, 2000.0));
        assert!(range.is_ordered());
    }

}
