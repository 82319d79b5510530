use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawRow – one record of the source energy table
// ---------------------------------------------------------------------------

/// A single row of the source table, as produced by the loader.
///
/// Only the columns the narrative needs are kept; every metric is optional
/// because the source leaves cells empty for years with no reporting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub iso_code: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub primary_energy_consumption: Option<f64>,
    #[serde(default)]
    pub renewables_consumption: Option<f64>,
    #[serde(default)]
    pub coal_consumption: Option<f64>,
    #[serde(default)]
    pub oil_consumption: Option<f64>,
    #[serde(default)]
    pub gas_consumption: Option<f64>,
    #[serde(default)]
    pub nuclear_consumption: Option<f64>,
}

/// Column names understood by the loaders, in source order.
pub const COLUMNS: [&str; 9] = [
    "country",
    "iso_code",
    "year",
    "primary_energy_consumption",
    "renewables_consumption",
    "coal_consumption",
    "oil_consumption",
    "gas_consumption",
    "nuclear_consumption",
];

// ---------------------------------------------------------------------------
// EnergyTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed source table. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct EnergyTable {
    pub rows: Vec<RawRow>,
}

impl EnergyTable {
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        EnergyTable { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct entities (country names, falling back to ISO codes).
    pub fn entity_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.country.as_deref().or(r.iso_code.as_deref()))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

// ---------------------------------------------------------------------------
// DerivedRow – one retained, enriched record
// ---------------------------------------------------------------------------

/// A retained aggregate row with the fields every scene plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRow {
    pub year: i32,
    /// Primary energy consumption; always finite.
    pub primary: f64,
    /// Renewables as a percentage of primary. NaN or infinite when undefined.
    pub renewables_share: f64,
    /// coal + oil + gas, missing components counted as zero.
    pub fossil: f64,
    /// nuclear + renewables, missing components counted as zero.
    pub zero_carbon: f64,
}

impl DerivedRow {
    /// The renewables share, or `None` when it is undefined for this year.
    pub fn share(&self) -> Option<f64> {
        self.renewables_share
            .is_finite()
            .then_some(self.renewables_share)
    }

    /// Height of the stacked composition at this year.
    pub fn stacked_total(&self) -> f64 {
        self.fossil + self.zero_carbon
    }
}

/// The quantity a scene places on its y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Primary,
    RenewablesShare,
    Fossil,
    ZeroCarbon,
    StackedTotal,
}

impl Metric {
    /// Read this metric from a derived row. Undefined values come back non-finite.
    pub fn value(self, row: &DerivedRow) -> f64 {
        match self {
            Metric::Primary => row.primary,
            Metric::RenewablesShare => row.renewables_share,
            Metric::Fossil => row.fossil,
            Metric::ZeroCarbon => row.zero_carbon,
            Metric::StackedTotal => row.stacked_total(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Primary => "Primary energy consumption",
            Metric::RenewablesShare => "Renewables share",
            Metric::Fossil => "Fossil fuels",
            Metric::ZeroCarbon => "Nuclear + renewables",
            Metric::StackedTotal => "Total consumption",
        }
    }
}
