//! Writes `sample_energy.csv` and `sample_energy.parquet`: a synthetic world
//! series plus a couple of countries, with gaps where real tables have them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use energy_story::data::model::{COLUMNS, RawRow};

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

    /// Multiplicative jitter in `[1 - spread, 1 + spread]`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + (self.next_f64() * 2.0 - 1.0) * spread
    }
}

struct Entity {
    country: &'static str,
    iso_code: &'static str,
    /// Primary consumption in 1965 and 2022.
    primary: (f64, f64),
    /// Fuel mix (coal, oil, gas, nuclear) as fractions, 1965 then 2022.
    mix: ([f64; 4], [f64; 4]),
    /// Renewables share (fraction) in 1965 and 2022.
    renewables: (f64, f64),
    /// First year with a reported renewables value.
    renewables_from: i32,
}

const FIRST_YEAR: i32 = 1965;
const LAST_YEAR: i32 = 2022;

const ENTITIES: [Entity; 3] = [
    Entity {
        country: "World",
        iso_code: "OWID_WRL",
        primary: (43_360.0, 176_000.0),
        mix: ([0.38, 0.42, 0.15, 0.0], [0.27, 0.31, 0.23, 0.04]),
        renewables: (0.005, 0.145),
        renewables_from: 1971,
    },
    Entity {
        country: "France",
        iso_code: "FRA",
        primary: (1_300.0, 2_600.0),
        mix: ([0.30, 0.55, 0.05, 0.01], [0.02, 0.30, 0.15, 0.36]),
        renewables: (0.06, 0.14),
        renewables_from: 1965,
    },
    Entity {
        country: "Germany",
        iso_code: "DEU",
        primary: (3_200.0, 3_300.0),
        mix: ([0.60, 0.30, 0.03, 0.0], [0.19, 0.34, 0.22, 0.03]),
        renewables: (0.01, 0.20),
        renewables_from: 1980,
    },
];

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn generate(rng: &mut SimpleRng) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for e in &ENTITIES {
        for year in FIRST_YEAR..=LAST_YEAR {
            let t = (year - FIRST_YEAR) as f64 / (LAST_YEAR - FIRST_YEAR) as f64;
            // Slightly convex growth with a few percent of noise.
            let primary = lerp(e.primary.0, e.primary.1, t.powf(1.15)) * rng.jitter(0.02);
            let fuel = |i: usize| primary * lerp(e.mix.0[i], e.mix.1[i], t);
            let renewables = (year >= e.renewables_from)
                .then(|| primary * lerp(e.renewables.0, e.renewables.1, t.powi(3)));

            rows.push(RawRow {
                country: Some(e.country.to_string()),
                iso_code: Some(e.iso_code.to_string()),
                year,
                primary_energy_consumption: Some(primary.round()),
                renewables_consumption: renewables.map(f64::round),
                coal_consumption: Some(fuel(0).round()),
                oil_consumption: Some(fuel(1).round()),
                gas_consumption: Some(fuel(2).round()),
                nuclear_consumption: (e.mix.1[3] > 0.0 && year >= 1970).then(|| fuel(3).round()),
            });
        }
    }
    rows
}

fn numeric(rows: &[RawRow], get: impl Fn(&RawRow) -> Option<f64>) -> ArrayRef {
    Arc::new(rows.iter().map(get).collect::<Float64Array>())
}

fn write_csv(path: &Path, rows: &[RawRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(COLUMNS).context("writing CSV header")?;
    let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for r in rows {
        writer
            .write_record([
                r.country.clone().unwrap_or_default(),
                r.iso_code.clone().unwrap_or_default(),
                r.year.to_string(),
                cell(r.primary_energy_consumption),
                cell(r.renewables_consumption),
                cell(r.coal_consumption),
                cell(r.oil_consumption),
                cell(r.gas_consumption),
                cell(r.nuclear_consumption),
            ])
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[RawRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, true),
        Field::new("iso_code", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
        Field::new("primary_energy_consumption", DataType::Float64, true),
        Field::new("renewables_consumption", DataType::Float64, true),
        Field::new("coal_consumption", DataType::Float64, true),
        Field::new("oil_consumption", DataType::Float64, true),
        Field::new("gas_consumption", DataType::Float64, true),
        Field::new("nuclear_consumption", DataType::Float64, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(rows.iter().map(|r| r.country.as_deref()).collect::<StringArray>()),
        Arc::new(rows.iter().map(|r| r.iso_code.as_deref()).collect::<StringArray>()),
        Arc::new(rows.iter().map(|r| r.year as i64).collect::<Int64Array>()),
        numeric(rows, |r| r.primary_energy_consumption),
        numeric(rows, |r| r.renewables_consumption),
        numeric(rows, |r| r.coal_consumption),
        numeric(rows, |r| r.oil_consumption),
        numeric(rows, |r| r.gas_consumption),
        numeric(rows, |r| r.nuclear_consumption),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = out_dir.join("sample_energy.csv");
    let parquet_path = out_dir.join("sample_energy.parquet");
    write_csv(&csv_path, &rows)?;
    write_parquet(&parquet_path, &rows)?;

    log::info!("Wrote {} rows", rows.len());
    println!(
        "Wrote {} rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
