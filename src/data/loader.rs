use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{EnergyTable, RawRow};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an energy table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per entity-year (the usual export)
/// * `.json`    – `[{ "country": "World", "year": 1965, ... }, ...]`
/// * `.parquet` – one column per field; numeric columns may be int or float
pub fn load_file(path: &Path) -> Result<EnergyTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Empty cells become `None`; columns not listed in [`RawRow`] are ignored.
fn load_csv(path: &Path) -> Result<EnergyTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<EnergyTable> {
    let headers = reader.headers().context("reading CSV headers")?;
    if !headers.iter().any(|h| h == "year") {
        bail!("CSV missing 'year' column");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    Ok(EnergyTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented array; `null` and absent keys become `None`.
fn load_json(path: &Path) -> Result<EnergyTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<EnergyTable> {
    let rows: Vec<RawRow> = serde_json::from_str(text).context("parsing JSON records")?;
    Ok(EnergyTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the energy table.
///
/// Only `year` is required. String columns may be Utf8 or LargeUtf8; metric
/// columns may be Float64, Float32, Int64 or Int32. Nulls become `None`.
fn load_parquet(path: &Path) -> Result<EnergyTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut rows)?;
    }

    Ok(EnergyTable::from_rows(rows))
}

fn read_batch(batch: &RecordBatch, rows: &mut Vec<RawRow>) -> Result<()> {
    let schema = batch.schema();
    let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

    let year_col = column("year").context("Parquet file missing 'year' column")?;
    let country = column("country");
    let iso_code = column("iso_code");
    let primary = column("primary_energy_consumption");
    let renewables = column("renewables_consumption");
    let coal = column("coal_consumption");
    let oil = column("oil_consumption");
    let gas = column("gas_consumption");
    let nuclear = column("nuclear_consumption");

    let numeric = |col: Option<&Arc<dyn Array>>, row: usize, name: &str| -> Result<Option<f64>> {
        match col {
            Some(c) => extract_f64(c, row).with_context(|| format!("Row {row}: failed to read '{name}'")),
            None => Ok(None),
        }
    };

    for row in 0..batch.num_rows() {
        let year = extract_year(year_col, row)
            .with_context(|| format!("Row {row}: failed to read 'year'"))?;

        rows.push(RawRow {
            country: country.and_then(|c| extract_string(c, row)),
            iso_code: iso_code.and_then(|c| extract_string(c, row)),
            year,
            primary_energy_consumption: numeric(primary, row, "primary_energy_consumption")?,
            renewables_consumption: numeric(renewables, row, "renewables_consumption")?,
            coal_consumption: numeric(coal, row, "coal_consumption")?,
            oil_consumption: numeric(oil, row, "oil_consumption")?,
            gas_consumption: numeric(gas, row, "gas_consumption")?,
            nuclear_consumption: numeric(nuclear, row, "nuclear_consumption")?,
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn extract_year(col: &Arc<dyn Array>, row: usize) -> Result<i32> {
    match extract_f64(col, row)? {
        Some(v) if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 => Ok(v as i32),
        Some(v) => bail!("year {v} is not an integer"),
        None => bail!("null year"),
    }
}

/// Read a numeric cell as `f64`, whatever the column's width.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    value
        .map(Some)
        .context("column type does not match its array")
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|s| s.value(row).to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const SAMPLE_CSV: &str = "\
country,year,iso_code,population,primary_energy_consumption,renewables_consumption,coal_consumption,oil_consumption,gas_consumption,nuclear_consumption
World,1965,OWID_WRL,3300000000,43360,200,20000,15000,5000,2000
World,1966,OWID_WRL,,44000,,21000,,5200,
France,1965,FRA,48000000,1500,90,400,700,100,
";

    #[test]
    fn csv_empty_cells_become_none() {
        let table = read_csv(csv::Reader::from_reader(SAMPLE_CSV.as_bytes())).unwrap();
        assert_eq!(table.len(), 3);

        let r = &table.rows[1];
        assert_eq!(r.year, 1966);
        assert_eq!(r.iso_code.as_deref(), Some("OWID_WRL"));
        assert_eq!(r.primary_energy_consumption, Some(44000.0));
        assert_eq!(r.renewables_consumption, None);
        assert_eq!(r.oil_consumption, None);
        assert_eq!(r.nuclear_consumption, None);
    }

    #[test]
    fn csv_without_year_is_rejected() {
        let data = "country,iso_code\nWorld,OWID_WRL\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("year"));
    }

    #[test]
    fn csv_with_bad_number_reports_row() {
        let data = "country,iso_code,year,primary_energy_consumption\nWorld,OWID_WRL,1965,lots\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn json_records_tolerate_nulls_and_missing_keys() {
        let table = parse_json(
            r#"[
                {"country": "World", "iso_code": "OWID_WRL", "year": 1965,
                 "primary_energy_consumption": 43360.0, "renewables_consumption": null},
                {"country": "World", "year": 1966, "extra": "ignored"}
            ]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].renewables_consumption, None);
        assert_eq!(table.rows[1].iso_code, None);
        assert_eq!(table.rows[1].primary_energy_consumption, None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("energy.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn parquet_reads_mixed_numeric_widths() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, true),
            Field::new("iso_code", DataType::Utf8, true),
            Field::new("year", DataType::Int64, false),
            Field::new("primary_energy_consumption", DataType::Float64, true),
            Field::new("coal_consumption", DataType::Int32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("World"), Some("World")])),
                Arc::new(StringArray::from(vec![Some("OWID_WRL"), None])),
                Arc::new(Int64Array::from(vec![1965, 1966])),
                Arc::new(Float64Array::from(vec![Some(43360.0), None])),
                Arc::new(Int32Array::from(vec![Some(20000), Some(21000)])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].year, 1965);
        assert_eq!(table.rows[0].primary_energy_consumption, Some(43360.0));
        assert_eq!(table.rows[0].coal_consumption, Some(20000.0));
        assert_eq!(table.rows[1].iso_code, None);
        assert_eq!(table.rows[1].primary_energy_consumption, None);
        assert_eq!(table.rows[1].renewables_consumption, None);
    }
}
