use super::model::{DerivedRow, Metric};

// ---------------------------------------------------------------------------
// Axis domains
// ---------------------------------------------------------------------------

/// How a scene chooses its y-domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YDomain {
    /// Fixed bounds regardless of the data (the percentage scene).
    Fixed(f64, f64),
    /// `[0, max(metric)]` over the defined values of the metric.
    ZeroToMax(Metric),
}

/// Fallback upper bound when a metric has no positive defined value.
const EMPTY_MAX: f64 = 1.0;

/// `[minYear, maxYear]` over the whole retained series, or `None` if empty.
pub fn year_domain(rows: &[DerivedRow]) -> Option<(f64, f64)> {
    let min = rows.iter().map(|r| r.year).min()?;
    let max = rows.iter().map(|r| r.year).max()?;
    Some((min as f64, max as f64))
}

/// Largest finite value of `metric`, ignoring undefined points.
pub fn defined_max(rows: &[DerivedRow], metric: Metric) -> Option<f64> {
    rows.iter()
        .map(|r| metric.value(r))
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}

/// The y-domain a scene should use for this dataset.
pub fn value_domain(rows: &[DerivedRow], policy: YDomain) -> (f64, f64) {
    match policy {
        YDomain::Fixed(lo, hi) => (lo, hi),
        YDomain::ZeroToMax(metric) => match defined_max(rows, metric) {
            Some(max) if max > 0.0 => (0.0, max),
            _ => (0.0, EMPTY_MAX),
        },
    }
}

// ---------------------------------------------------------------------------
// Linear scales
// ---------------------------------------------------------------------------

/// Maps a numeric domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Project a domain value to the range. A zero-width domain maps to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Roughly `count` evenly spaced tick values on 1/2/5 steps, inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.domain.0.min(self.domain.1), self.domain.0.max(self.domain.1));
        let span = hi - lo;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return vec![lo];
        }

        let step = nice_step(span / count as f64);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// The shared x/y scale pair. The x-domain follows the dataset; the
/// y-domain is reset by every scene render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    /// Scales over a plot area `[left, right] × [bottom, top]` in pixels.
    /// The y range is inverted so larger values sit higher.
    pub fn for_area(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            x: LinearScale::new((0.0, 1.0), (left, right)),
            y: LinearScale::new((0.0, 1.0), (bottom, top)),
        }
    }

    /// Pixel position of a data point.
    pub fn project(&self, point: [f64; 2]) -> [f64; 2] {
        [self.x.map(point[0]), self.y.map(point[1])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, primary: f64, share: f64, fossil: f64, zero: f64) -> DerivedRow {
        DerivedRow {
            year,
            primary,
            renewables_share: share,
            fossil,
            zero_carbon: zero,
        }
    }

    fn sample() -> Vec<DerivedRow> {
        vec![
            row(1965, 43360.0, f64::NAN, 40000.0, 2200.0),
            row(1990, 100000.0, 6.0, 80000.0, 9000.0),
            row(2020, 170000.0, 10.6, 150000.0, 28000.0),
        ]
    }

    #[test]
    fn fixed_domain_ignores_data() {
        assert_eq!(value_domain(&sample(), YDomain::Fixed(0.0, 100.0)), (0.0, 100.0));
        assert_eq!(value_domain(&[], YDomain::Fixed(0.0, 100.0)), (0.0, 100.0));
    }

    #[test]
    fn primary_domain_uses_max() {
        let d = value_domain(&sample(), YDomain::ZeroToMax(Metric::Primary));
        assert_eq!(d, (0.0, 170000.0));
    }

    #[test]
    fn stacked_domain_uses_sum_not_layer_max() {
        let d = value_domain(&sample(), YDomain::ZeroToMax(Metric::StackedTotal));
        assert_eq!(d, (0.0, 178000.0));
    }

    #[test]
    fn undefined_values_are_ignored() {
        let rows = vec![
            row(2000, 10.0, f64::NAN, 0.0, 0.0),
            row(2001, 10.0, f64::INFINITY, 0.0, 0.0),
            row(2002, 10.0, 4.5, 0.0, 0.0),
        ];
        assert_eq!(defined_max(&rows, Metric::RenewablesShare), Some(4.5));
    }

    #[test]
    fn degenerate_domains_fall_back() {
        let rows = vec![row(2000, 10.0, f64::NAN, 0.0, 0.0)];
        assert_eq!(
            value_domain(&rows, YDomain::ZeroToMax(Metric::RenewablesShare)),
            (0.0, 1.0)
        );
        assert_eq!(value_domain(&rows, YDomain::ZeroToMax(Metric::Fossil)), (0.0, 1.0));
    }

    #[test]
    fn year_domain_spans_all_rows() {
        assert_eq!(year_domain(&sample()), Some((1965.0, 2020.0)));
        assert_eq!(year_domain(&[]), None);
    }

    #[test]
    fn scale_maps_linearly_and_inverts_y() {
        let mut scales = Scales::for_area(80.0, 770.0, 40.0, 450.0);
        scales.x.domain = (1965.0, 2020.0);
        scales.y.domain = (0.0, 100.0);
        assert_eq!(scales.project([1965.0, 0.0]), [80.0, 450.0]);
        assert_eq!(scales.project([2020.0, 100.0]), [770.0, 40.0]);
        assert_eq!(scales.y.map(50.0), 245.0);
    }

    #[test]
    fn zero_width_domain_maps_to_middle() {
        let s = LinearScale::new((2000.0, 2000.0), (0.0, 100.0));
        assert_eq!(s.map(2000.0), 50.0);
    }

    #[test]
    fn ticks_use_round_steps() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let years = LinearScale::new((1965.0, 2020.0), (0.0, 1.0));
        assert_eq!(years.ticks(6), vec![1970.0, 1980.0, 1990.0, 2000.0, 2010.0, 2020.0]);
    }
}
