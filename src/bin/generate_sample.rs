//! Writes a small synthetic launch-records dataset as both CSV and Parquet.
//!
//! Usage: `cargo run --bin generate_sample [OUT_DIR]`

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct LaunchRow {
    flight: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster: &'static str,
}

/// Heavier payloads fly on later booster generations.
fn booster_for(payload_kg: f64) -> &'static str {
    match payload_kg {
        p if p < 2000.0 => "v1.0",
        p if p < 4000.0 => "v1.1",
        p if p < 7000.0 => "FT",
        p if p < 10_000.0 => "B4",
        _ => "B5",
    }
}

/// Landing success rates improve with each booster generation.
fn success_rate(booster: &str) -> f64 {
    match booster {
        "v1.0" => 0.40,
        "v1.1" => 0.55,
        "FT" => 0.75,
        "B4" => 0.85,
        _ => 0.92,
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    let sites: [(&'static str, usize); 4] = [
        ("CCAFS LC-40", 26),
        ("VAFB SLC-4E", 10),
        ("KSC LC-39A", 13),
        ("CCAFS SLC-40", 7),
    ];

    let mut rows = Vec::new();
    let mut flight: i64 = 1;
    for (site, count) in sites {
        for _ in 0..count {
            let payload = rng
                .gauss(5200.0, 3300.0)
                .clamp(300.0, 15_600.0);
            let payload = (payload / 100.0).round() * 100.0;
            let booster = booster_for(payload);
            let class = if rng.next_f64() < success_rate(booster) {
                1
            } else {
                0
            };
            rows.push(LaunchRow {
                flight,
                site,
                class,
                payload,
                booster,
            });
            flight += 1;
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for row in rows {
        writer.write_record([
            row.flight.to_string(),
            row.site.to_string(),
            row.class.to_string(),
            format!("{:.1}", row.payload),
            row.booster.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[LaunchRow], path: &Path) -> anyhow::Result<()> {
    let flight_array = Int64Array::from(rows.iter().map(|r| r.flight).collect::<Vec<_>>());
    let site_array = StringArray::from(rows.iter().map(|r| r.site).collect::<Vec<_>>());
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let payload_array = Float64Array::from(rows.iter().map(|r| r.payload).collect::<Vec<_>>());
    let booster_array = StringArray::from(rows.iter().map(|r| r.booster).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(booster_array),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let csv_path = out_dir.join("launch_records.csv");
    let parquet_path = out_dir.join("launch_records.parquet");
    write_csv(&rows, &csv_path)?;
    write_parquet(&rows, &parquet_path)?;

    println!(
        "Wrote {} launches to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
