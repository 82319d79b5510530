use super::filter::RetainedRow;
use super::model::DerivedRow;

// ---------------------------------------------------------------------------
// Series derivation
// ---------------------------------------------------------------------------

/// Enrich one retained row with the fields the scenes plot.
///
/// Never fails: missing summation components count as zero, and a missing
/// renewables value (or a zero primary) leaves the share non-finite.
pub fn derive_row(row: &RetainedRow<'_>) -> DerivedRow {
    let raw = row.raw;
    let part = |v: Option<f64>| v.unwrap_or(0.0);

    let renewables_share = raw
        .renewables_consumption
        .map(|r| r / row.primary * 100.0)
        .unwrap_or(f64::NAN);

    DerivedRow {
        year: raw.year,
        primary: row.primary,
        renewables_share,
        fossil: part(raw.coal_consumption) + part(raw.oil_consumption) + part(raw.gas_consumption),
        zero_carbon: part(raw.nuclear_consumption) + part(raw.renewables_consumption),
    }
}

/// Derive the whole series. Order follows the input, which is assumed to be
/// ascending by year.
pub fn derive_series(rows: &[RetainedRow<'_>]) -> Vec<DerivedRow> {
    rows.iter().map(derive_row).collect()
}
