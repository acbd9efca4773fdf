use std::collections::BTreeMap;
use std::fmt;

use super::loader::DataLoadError;

// ---------------------------------------------------------------------------
// Outcome – binary launch result
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the source data as a 0/1 `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Interpret the source `class` value (1 = success, 0 = failure).
    pub fn from_class(class: i64) -> Option<Outcome> {
        match class {
            1 => Some(Outcome::Success),
            0 => Some(Outcome::Failure),
            _ => None,
        }
    }

    /// The 0.0/1.0 encoding used as the y axis of the correlation chart.
    pub fn as_class(self) -> f64 {
        match self {
            Outcome::Success => 1.0,
            Outcome::Failure => 0.0,
        }
    }

    /// Display name, matching the pie slice labels.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failed",
        }
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a single passthrough cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell from a column the dashboard logic never reads.
/// Kept only so the records table can display the full row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, ""),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table). Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name.
    pub site: String,
    /// Payload mass in kilograms; finite and ≥ 0.
    pub payload_kg: f64,
    /// Binary launch outcome.
    pub outcome: Outcome,
    /// Booster version category (colors the correlation chart).
    pub booster_category: String,
    /// Passthrough columns: column_name → value.
    pub extra: BTreeMap<String, FieldValue>,
}

// ---------------------------------------------------------------------------
// SiteSelection / SiteOption – the site control's vocabulary
// ---------------------------------------------------------------------------

/// The site filter control value: everything, or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Human-readable label, used verbatim in chart titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(name) => name,
        }
    }

    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }
}

/// One entry of the site selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: SiteSelection,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed derived constants.
///
/// Constructed once at load time and read-only afterwards; queries take it
/// by shared reference, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct site names, in first-seen order.
    sites: Vec<String>,
    /// Distinct booster version categories, in first-seen order.
    booster_categories: Vec<String>,
    /// Passthrough column names, sorted.
    extra_columns: Vec<String>,
    /// (min, max) over all `payload_kg` values.
    payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the dataset and its derived constants, enforcing the table
    /// invariants: at least one record, every payload finite and ≥ 0.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut extra_columns: Vec<String> = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if !rec.payload_kg.is_finite() || rec.payload_kg < 0.0 {
                return Err(DataLoadError::InvalidPayload {
                    row,
                    value: rec.payload_kg,
                });
            }
            min_payload = min_payload.min(rec.payload_kg);
            max_payload = max_payload.max(rec.payload_kg);

            if !sites.iter().any(|s| *s == rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.iter().any(|c| *c == rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
            for col in rec.extra.keys() {
                if !extra_columns.iter().any(|c| c == col) {
                    extra_columns.push(col.clone());
                }
            }
        }
        extra_columns.sort();

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            extra_columns,
            payload_bounds: (min_payload, max_payload),
        })
    }

    /// All records, in source order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty (never true for a loaded dataset).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site names in first-seen order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster version categories in first-seen order.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Passthrough column names (for the records table).
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Entries for the site selector: "All Sites" first, then one option
    /// per distinct site in first-seen order.
    pub fn site_options(&self) -> Vec<SiteOption> {
        let mut options = Vec::with_capacity(self.sites.len() + 1);
        options.push(SiteOption {
            label: SiteSelection::All.label().to_string(),
            value: SiteSelection::All,
        });
        for site in &self.sites {
            options.push(SiteOption {
                label: site.clone(),
                value: SiteSelection::Site(site.clone()),
            });
        }
        options
    }

    /// (min, max) payload mass over the whole dataset.
    pub fn payload_bounds(&self) -> (f64, f64) {
        self.payload_bounds
    }
}
