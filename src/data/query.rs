use super::filter::{FilterState, PayloadRange};
use super::model::{LaunchDataset, LaunchRecord, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejections for malformed query arguments. The UI keeps its controls
/// within bounds, so these only fire if a caller bypasses that layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid payload range: low {low} is above high {high}")]
    InvalidRange { low: f64, high: f64 },
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Successful launches at one site (a slice of the all-sites pie).
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSuccesses {
    pub site: String,
    pub successes: usize,
}

/// Counts backing the outcome-distribution view.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeAggregate {
    /// One entry per distinct site, in first-seen order.
    BySite(Vec<SiteSuccesses>),
    /// Success vs. failure totals for a single site.
    SingleSite {
        site: String,
        successes: usize,
        failures: usize,
    },
}

/// Filtered subset plus the display label for the correlation view. The
/// records borrow from the dataset; nothing is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadCorrelation<'a> {
    pub records: Vec<&'a LaunchRecord>,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Query operations (pure; stateless between calls)
// ---------------------------------------------------------------------------

/// Counts for the outcome-distribution pie.
///
/// With `All` selected this returns, per site, the number of *successful*
/// launches (the sum of the 0/1 `class` column), even though the view is
/// titled "Total Launched By Site". That mismatch is intentional. With a
/// single site selected it returns the success and failure totals for that
/// site; an unknown site yields zero counts.
pub fn outcome_distribution(dataset: &LaunchDataset, selection: &SiteSelection) -> OutcomeAggregate {
    match selection {
        SiteSelection::All => {
            let mut counts = vec![0usize; dataset.sites().len()];
            for rec in dataset.records() {
                if rec.outcome == Outcome::Success {
                    if let Some(idx) = dataset.sites().iter().position(|s| *s == rec.site) {
                        counts[idx] += 1;
                    }
                }
            }
            OutcomeAggregate::BySite(
                dataset
                    .sites()
                    .iter()
                    .zip(counts)
                    .map(|(site, successes)| SiteSuccesses {
                        site: site.clone(),
                        successes,
                    })
                    .collect(),
            )
        }
        SiteSelection::Site(site) => {
            let mut successes = 0;
            let mut failures = 0;
            for rec in dataset.records().iter().filter(|r| r.site == *site) {
                match rec.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }
            OutcomeAggregate::SingleSite {
                site: site.clone(),
                successes,
                failures,
            }
        }
    }
}

/// The filtered subset for the payload-correlation scatter, together with
/// the label used verbatim in its chart title.
///
/// Rejects a range whose low end is above its high end; an empty subset is
/// a valid result, not an error.
pub fn payload_correlation<'a>(
    dataset: &'a LaunchDataset,
    selection: &SiteSelection,
    payload_range: PayloadRange,
) -> Result<PayloadCorrelation<'a>, QueryError> {
    if !payload_range.is_ordered() {
        return Err(QueryError::InvalidRange {
            low: payload_range.low,
            high: payload_range.high,
        });
    }

    let filters = FilterState {
        selected_site: selection.clone(),
        payload_range,
    };
    let records = dataset
        .records()
        .iter()
        .filter(|rec| filters.matches(rec))
        .collect();

    Ok(PayloadCorrelation {
        records,
        label: selection.label().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(site: &str, payload: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_kg: payload,
            outcome,
            booster_category: "FT".to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Site A: 3 successes, 1 failure. Site B: 0 successes, 2 failures.
    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 400.0, Outcome::Success),
            record("A", 1000.0, Outcome::Success),
            record("A", 2000.0, Outcome::Success),
            record("A", 1500.0, Outcome::Failure),
            record("B", 600.0, Outcome::Failure),
            record("B", 900.0, Outcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_distribution_counts_successes_per_site() {
        let ds = two_site_dataset();
        let agg = outcome_distribution(&ds, &SiteSelection::All);
        assert_eq!(
            agg,
            OutcomeAggregate::BySite(vec![
                SiteSuccesses { site: "A".into(), successes: 3 },
                SiteSuccesses { site: "B".into(), successes: 0 },
            ])
        );
    }

    #[test]
    fn all_sites_counts_sum_to_total_success_count() {
        let ds = two_site_dataset();
        let total_successes = ds
            .records()
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count();
        match outcome_distribution(&ds, &SiteSelection::All) {
            OutcomeAggregate::BySite(counts) => {
                let sum: usize = counts.iter().map(|c| c.successes).sum();
                assert_eq!(sum, total_successes);
            }
            other => panic!("expected BySite, got {other:?}"),
        }
    }

    #[test]
    fn single_site_distribution_splits_success_and_failure() {
        let ds = two_site_dataset();
        let agg = outcome_distribution(&ds, &SiteSelection::Site("B".into()));
        assert_eq!(
            agg,
            OutcomeAggregate::SingleSite {
                site: "B".into(),
                successes: 0,
                failures: 2,
            }
        );
    }

    #[test]
    fn single_site_counts_sum_to_site_subset_size() {
        let ds = two_site_dataset();
        for site in ["A", "B"] {
            let subset_size = ds.records().iter().filter(|r| r.site == site).count();
            match outcome_distribution(&ds, &SiteSelection::Site(site.into())) {
                OutcomeAggregate::SingleSite { successes, failures, .. } => {
                    assert_eq!(successes + failures, subset_size);
                }
                other => panic!("expected SingleSite, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_site_yields_zero_counts_not_an_error() {
        let ds = two_site_dataset();
        let agg = outcome_distribution(&ds, &SiteSelection::Site("C".into()));
        assert_eq!(
            agg,
            OutcomeAggregate::SingleSite {
                site: "C".into(),
                successes: 0,
                failures: 0,
            }
        );
    }

    #[test]
    fn payload_range_selects_only_records_inside_it() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 400.0, Outcome::Success),
            record("A", 1000.0, Outcome::Failure),
            record("A", 2000.0, Outcome::Success),
        ])
        .unwrap();

        let corr =
            payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(500.0, 1500.0)).unwrap();
        assert_eq!(corr.records.len(), 1);
        assert_eq!(corr.records[0].payload_kg, 1000.0);
    }

    #[test]
    fn subset_records_all_satisfy_both_constraints() {
        let ds = two_site_dataset();
        let range = PayloadRange::new(500.0, 1600.0);
        let selection = SiteSelection::Site("A".into());
        let corr = payload_correlation(&ds, &selection, range).unwrap();

        for rec in &corr.records {
            assert!(selection.matches(&rec.site));
            assert!(range.contains(rec.payload_kg));
        }
        // No record outside the subset satisfies both constraints.
        let outside = ds
            .records()
            .iter()
            .filter(|r| !corr.records.iter().any(|kept| std::ptr::eq(*kept, *r)))
            .filter(|r| selection.matches(&r.site) && range.contains(r.payload_kg))
            .count();
        assert_eq!(outside, 0);
    }

    #[test]
    fn full_range_all_sites_returns_entire_dataset_with_label() {
        let ds = two_site_dataset();
        let (min, max) = ds.payload_bounds();
        let corr =
            payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(min, max)).unwrap();
        assert_eq!(corr.label, "All Sites");
        assert_eq!(corr.records.len(), ds.len());
    }

    #[test]
    fn single_site_label_is_the_site_name() {
        let ds = two_site_dataset();
        let corr = payload_correlation(
            &ds,
            &SiteSelection::Site("A".into()),
            PayloadRange::new(0.0, 5000.0),
        )
        .unwrap();
        assert_eq!(corr.label, "A");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let ds = two_site_dataset();
        let err = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(1500.0, 500.0))
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidRange {
                low: 1500.0,
                high: 500.0
            }
        );
    }

    #[test]
    fn queries_are_idempotent() {
        let ds = two_site_dataset();
        let selection = SiteSelection::Site("A".into());
        let range = PayloadRange::new(500.0, 1600.0);

        assert_eq!(
            outcome_distribution(&ds, &selection),
            outcome_distribution(&ds, &selection)
        );
        assert_eq!(
            payload_correlation(&ds, &selection, range).unwrap(),
            payload_correlation(&ds, &selection, range).unwrap()
        );
    }
}
