use super::model::RawRow;

// ---------------------------------------------------------------------------
// Aggregate row selection
// ---------------------------------------------------------------------------

/// ISO code the source table uses for its worldwide total.
pub const WORLD_ISO_CODE: &str = "OWID_WRL";

/// A raw row that passed the filter, with its primary metric unwrapped.
#[derive(Debug, Clone, Copy)]
pub struct RetainedRow<'a> {
    pub raw: &'a RawRow,
    pub primary: f64,
}

/// Whether a row is the aggregate entity identified by `iso_code`.
///
/// Matching is on the ISO code only; rows without one never match.
pub fn is_aggregate(row: &RawRow, iso_code: &str) -> bool {
    row.iso_code.as_deref() == Some(iso_code)
}

/// Select the aggregate rows that carry a finite primary metric, in source order.
///
/// An empty result is a valid outcome; the caller decides how to report it.
pub fn aggregate_rows<'a>(rows: &'a [RawRow], iso_code: &str) -> Vec<RetainedRow<'a>> {
    rows.iter()
        .filter(|row| is_aggregate(row, iso_code))
        .filter_map(|raw| {
            raw.primary_energy_consumption
                .filter(|p| p.is_finite())
                .map(|primary| RetainedRow { raw, primary })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(iso: Option<&str>, country: &str, year: i32, primary: Option<f64>) -> RawRow {
        RawRow {
            country: Some(country.to_string()),
            iso_code: iso.map(str::to_string),
            year,
            primary_energy_consumption: primary,
            ..Default::default()
        }
    }

    #[test]
    fn keeps_only_world_rows_with_primary() {
        let rows = vec![
            row(Some("OWID_WRL"), "World", 1965, Some(43360.0)),
            row(Some("FRA"), "France", 1965, Some(1500.0)),
            row(Some("OWID_WRL"), "World", 1966, None),
            row(Some("OWID_WRL"), "World", 1967, Some(f64::NAN)),
            row(Some("OWID_WRL"), "World", 1968, Some(46000.0)),
        ];
        let kept = aggregate_rows(&rows, WORLD_ISO_CODE);
        let years: Vec<i32> = kept.iter().map(|r| r.raw.year).collect();
        assert_eq!(years, vec![1965, 1968]);
        assert_eq!(kept[0].primary, 43360.0);
    }

    #[test]
    fn country_name_alone_does_not_match() {
        let rows = vec![row(None, "World", 1965, Some(43360.0))];
        assert!(aggregate_rows(&rows, WORLD_ISO_CODE).is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        let rows = vec![row(Some("DEU"), "Germany", 2000, Some(14000.0))];
        assert!(aggregate_rows(&rows, WORLD_ISO_CODE).is_empty());
    }

    fn arb_row() -> impl Strategy<Value = RawRow> {
        (
            prop_oneof![Just(None), Just(Some("OWID_WRL")), Just(Some("USA"))],
            1900..2030i32,
            prop_oneof![
                Just(None),
                Just(Some(f64::NAN)),
                Just(Some(f64::INFINITY)),
                (0.0..1e6f64).prop_map(Some),
            ],
        )
            .prop_map(|(iso, year, primary)| row(iso, "x", year, primary))
    }

    proptest! {
        #[test]
        fn prop_filter_output_is_aggregate_and_finite(rows in proptest::collection::vec(arb_row(), 0..40)) {
            let kept = aggregate_rows(&rows, WORLD_ISO_CODE);
            prop_assert!(kept.len() <= rows.len());
            for r in &kept {
                prop_assert_eq!(r.raw.iso_code.as_deref(), Some(WORLD_ISO_CODE));
                prop_assert!(r.primary.is_finite());
                prop_assert_eq!(r.raw.primary_energy_consumption, Some(r.primary));
            }
            let expected = rows
                .iter()
                .filter(|r| is_aggregate(r, WORLD_ISO_CODE)
                    && r.primary_energy_consumption.is_some_and(f64::is_finite))
                .count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
