use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FieldValue, LaunchDataset, LaunchRecord, Outcome};

/// Required columns; everything else is carried as a passthrough field.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that make a dataset source unusable. All are fatal for the load;
/// the caller decides whether the process survives (see `main`).
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file could not be read at all.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Extension is none of csv / json / parquet.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    /// A required column is absent from the source schema.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    /// A row lacks a required field (records-oriented JSON).
    #[error("Row {row}: missing required field '{column}'")]
    MissingField { row: usize, column: String },
    /// A cell could not be interpreted for its column.
    #[error("Row {row}: invalid value '{value}' for column '{column}'")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
    /// Payload mass must be finite and non-negative.
    #[error("Row {row}: payload mass {value} is not a finite non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    /// The source parsed fine but held no records.
    #[error("Dataset contains no records")]
    Empty,
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Failed to decode Parquet data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-record dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required columns
/// * `.json`    – `[{ "Launch Site": ..., "class": 0/1, ... }, ...]`
/// * `.parquet` – flat scalar columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut required_idx = [0usize; 4];
    for (slot, col) in required_idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == col)
            .ok_or_else(|| DataLoadError::MissingColumn(col.to_string()))?;
    }
    let [site_idx, payload_idx, class_idx, booster_idx] = required_idx;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload_kg = cell(payload_idx)
            .parse::<f64>()
            .map_err(|_| invalid_cell(row, COL_PAYLOAD, cell(payload_idx)))?;
        let class = cell(class_idx)
            .parse::<i64>()
            .map_err(|_| invalid_cell(row, COL_CLASS, cell(class_idx)))?;
        let outcome = Outcome::from_class(class)
            .ok_or_else(|| invalid_cell(row, COL_CLASS, cell(class_idx)))?;

        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if required_idx.contains(&col_idx) {
                continue;
            }
            extra.insert(headers[col_idx].clone(), guess_field_value(value));
        }

        records.push(LaunchRecord {
            site: cell(site_idx).to_string(),
            payload_kg,
            outcome,
            booster_category: cell(booster_idx).to_string(),
            extra,
        });
    }

    LaunchDataset::from_records(records)
}

fn invalid_cell(row: usize, column: &str, value: &str) -> DataLoadError {
    DataLoadError::InvalidCell {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Best-effort typing for a passthrough CSV cell.
fn guess_field_value(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
/// a top-level array of row objects keyed by column name.
fn load_json(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| DataLoadError::InvalidCell {
        row: 0,
        column: "<root>".to_string(),
        value: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or_else(|| DataLoadError::InvalidCell {
            row,
            column: "<row>".to_string(),
            value: "not a JSON object".to_string(),
        })?;

        let site_field = json_field(obj, row, COL_SITE)?;
        let site = site_field
            .as_str()
            .ok_or_else(|| invalid_cell(row, COL_SITE, &site_field.to_string()))?
            .to_string();
        let payload_field = json_field(obj, row, COL_PAYLOAD)?;
        let payload_kg = payload_field
            .as_f64()
            .ok_or_else(|| invalid_cell(row, COL_PAYLOAD, &payload_field.to_string()))?;
        let class_field = json_field(obj, row, COL_CLASS)?;
        let outcome = class_field
            .as_i64()
            .and_then(Outcome::from_class)
            .ok_or_else(|| invalid_cell(row, COL_CLASS, &class_field.to_string()))?;
        let booster_field = json_field(obj, row, COL_BOOSTER)?;
        let booster_category = booster_field
            .as_str()
            .ok_or_else(|| invalid_cell(row, COL_BOOSTER, &booster_field.to_string()))?
            .to_string();

        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            if REQUIRED_COLUMNS.contains(&key.as_str()) {
                continue;
            }
            extra.insert(key.clone(), json_to_field_value(val));
        }

        records.push(LaunchRecord {
            site,
            payload_kg,
            outcome,
            booster_category,
            extra,
        });
    }

    LaunchDataset::from_records(records)
}

fn json_field<'a>(
    obj: &'a serde_json::Map<String, JsonValue>,
    row: usize,
    column: &str,
) -> Result<&'a JsonValue, DataLoadError> {
    obj.get(column).ok_or_else(|| DataLoadError::MissingField {
        row,
        column: column.to_string(),
    })
}

fn json_to_field_value(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Expected schema: `Launch Site` (utf8), `Payload Mass (kg)` (float or
/// int), `class` (int), `Booster Version Category` (utf8). Any other
/// columns are treated as passthrough fields. Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let mut required_idx = [0usize; 4];
        for (slot, col) in required_idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = schema
                .index_of(col)
                .map_err(|_| DataLoadError::MissingColumn(col.to_string()))?;
        }
        let [site_idx, payload_idx, class_idx, booster_idx] = required_idx;

        // Passthrough column indices (everything except the required four).
        let extra_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| !required_idx.contains(i))
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for batch_row in 0..batch.num_rows() {
            let site = string_at(batch.column(site_idx), batch_row)
                .ok_or_else(|| invalid_cell(row, COL_SITE, "<non-string>"))?;
            let payload_kg = f64_at(batch.column(payload_idx), batch_row)
                .ok_or_else(|| invalid_cell(row, COL_PAYLOAD, "<non-numeric>"))?;
            let outcome = i64_at(batch.column(class_idx), batch_row)
                .and_then(Outcome::from_class)
                .ok_or_else(|| invalid_cell(row, COL_CLASS, "<not 0/1>"))?;
            let booster_category = string_at(batch.column(booster_idx), batch_row)
                .ok_or_else(|| invalid_cell(row, COL_BOOSTER, "<non-string>"))?;

            let mut extra = BTreeMap::new();
            for (col_idx, col_name) in &extra_cols {
                extra.insert(
                    col_name.clone(),
                    extract_field_value(batch.column(*col_idx), batch_row),
                );
            }

            records.push(LaunchRecord {
                site,
                payload_kg,
                outcome,
                booster_category,
                extra,
            });
            row += 1;
        }
    }

    LaunchDataset::from_records(records)
}

// -- Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

fn f64_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

fn i64_at(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        _ => None,
    }
}

/// Extract a single passthrough value from an Arrow column at a given row.
fn extract_field_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                FieldValue::String(s.value(row).to_string())
            } else {
                let s = col.as_string::<i64>();
                FieldValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            FieldValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            FieldValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            FieldValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            FieldValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            FieldValue::Bool(arr.value(row))
        }
        _ => FieldValue::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category
1,CCAFS LC-40,0,500.0,v1.0
2,CCAFS LC-40,1,1000.0,v1.1
3,VAFB SLC-4E,1,2000.0,FT
";

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_load_parses_required_and_passthrough_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "launches.csv", SAMPLE_CSV);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_bounds(), (500.0, 2000.0));
        assert_eq!(ds.records()[0].outcome, Outcome::Failure);
        assert_eq!(ds.records()[1].outcome, Outcome::Success);
        assert_eq!(ds.records()[2].booster_category, "FT");
        assert_eq!(ds.extra_columns(), ["Flight Number"]);
        assert_eq!(
            ds.records()[0].extra.get("Flight Number"),
            Some(&FieldValue::Integer(1))
        );
    }

    #[test]
    fn csv_missing_required_column_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.csv",
            "Launch Site,Payload Mass (kg),Booster Version Category\nA,1.0,FT\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == COL_CLASS));
    }

    #[test]
    fn csv_rejects_class_outside_binary_domain() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,2,1.0,FT\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidCell { row: 0, ref column, .. } if column == COL_CLASS
        ));
    }

    #[test]
    fn csv_rejects_unparseable_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,heavy,FT\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidCell { ref column, .. } if column == COL_PAYLOAD
        ));
    }

    #[test]
    fn header_only_csv_is_an_empty_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "launches.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn json_load_parses_records_and_flags_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_temp(
            &dir,
            "launches.json",
            r#"[
                {"Launch Site": "KSC LC-39A", "class": 1, "Payload Mass (kg)": 3500.5,
                 "Booster Version Category": "FT", "Flight Number": 10},
                {"Launch Site": "KSC LC-39A", "class": 0, "Payload Mass (kg)": 600,
                 "Booster Version Category": "v1.1", "Flight Number": 11}
            ]"#,
        );

        let ds = load_file(&good).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_kg, 3500.5);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(
            ds.records()[0].extra.get("Flight Number"),
            Some(&FieldValue::Integer(10))
        );

        let bad = write_temp(
            &dir,
            "bad.json",
            r#"[{"Launch Site": "KSC LC-39A", "class": 1, "Payload Mass (kg)": 10.0}]"#,
        );
        let err = load_file(&bad).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingField { row: 0, ref column } if column == COL_BOOSTER
        ));
    }

    #[test]
    fn parquet_round_trip_preserves_records() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
            Field::new("Flight Number", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS SLC-40", "VAFB SLC-4E"])),
                Arc::new(Float64Array::from(vec![2500.0, 500.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B4", "v1.0"])),
                Arc::new(Int64Array::from(vec![21, 22])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].site, "CCAFS SLC-40");
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].payload_kg, 500.0);
        assert_eq!(
            ds.records()[1].extra.get("Flight Number"),
            Some(&FieldValue::Integer(22))
        );
    }
}
