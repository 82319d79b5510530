//! Scene 2: fossil and zero-carbon consumption as stacked areas.

use super::draw::{DrawList, FillTone, Mark, area_runs};
use super::format::{TickFormat, energy_label};
use super::{SceneContext, push_axes};
use crate::data::model::{DerivedRow, Metric};

/// Stacking order, bottom first.
pub const LAYERS: [(Metric, FillTone); 2] = [
    (Metric::Fossil, FillTone::Fossil),
    (Metric::ZeroCarbon, FillTone::ZeroCarbon),
];

/// One `(year, bottom, top)` band per row for each layer, in stacking order.
///
/// Each layer sits on the cumulative sum of the layers below it.
pub fn stack(rows: &[DerivedRow]) -> Vec<Vec<(f64, f64, f64)>> {
    let mut base = vec![0.0; rows.len()];
    LAYERS
        .iter()
        .map(|(metric, _)| {
            rows.iter()
                .zip(base.iter_mut())
                .map(|(r, bottom)| {
                    let top = *bottom + metric.value(r);
                    let band = (r.year as f64, *bottom, top);
                    *bottom = top;
                    band
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn draw(ctx: &SceneContext<'_>, out: &mut DrawList) {
    push_axes(ctx, "Consumption (PJ)", TickFormat::Thousands, out);

    for ((metric, tone), bands) in LAYERS.iter().zip(stack(ctx.rows)) {
        out.push(Mark::Area {
            name: metric.label().to_string(),
            tone: *tone,
            runs: area_runs(bands),
        });
    }

    if ctx.annotations.hover_markers {
        for r in ctx.rows.iter().filter(|r| r.stacked_total().is_finite()) {
            out.push(Mark::Marker {
                at: [r.year as f64, r.stacked_total()],
                tooltip: energy_label(r.year, r.stacked_total()),
            });
        }
    }

    if ctx.annotations.callouts {
        if let Some(mid) = ctx.rows.get(ctx.rows.len() / 2) {
            let total = mid.stacked_total();
            if total.is_finite() {
                out.push(Mark::Callout {
                    anchor: [mid.year as f64, total],
                    offset: [-60.0, -40.0],
                    label: energy_label(mid.year, total),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnnotationMode;
    use crate::data::domain::Scales;

    fn row(year: i32, fossil: f64, zero_carbon: f64) -> DerivedRow {
        DerivedRow {
            year,
            primary: fossil + zero_carbon,
            renewables_share: 0.0,
            fossil,
            zero_carbon,
        }
    }

    fn render(rows: &[DerivedRow]) -> DrawList {
        let scales = Scales::for_area(0.0, 100.0, 0.0, 100.0);
        let ctx = SceneContext {
            rows,
            scales: &scales,
            annotations: AnnotationMode::default(),
            milestone_share: 10.0,
        };
        let mut out = DrawList::new();
        draw(&ctx, &mut out);
        out
    }

    #[test]
    fn zero_carbon_stacks_on_fossil() {
        let bands = stack(&[row(1965, 40000.0, 2200.0), row(2020, 150000.0, 28000.0)]);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0], vec![(1965.0, 0.0, 40000.0), (2020.0, 0.0, 150000.0)]);
        assert_eq!(bands[1], vec![(1965.0, 40000.0, 42200.0), (2020.0, 150000.0, 178000.0)]);
    }

    #[test]
    fn areas_use_two_fixed_tones_in_order() {
        let out = render(&[row(1965, 1.0, 1.0), row(1966, 2.0, 2.0)]);
        let tones: Vec<FillTone> = out.areas().map(|(tone, _)| tone).collect();
        assert_eq!(tones, vec![FillTone::Fossil, FillTone::ZeroCarbon]);
    }

    #[test]
    fn non_finite_boundary_gaps_both_layers_above_it() {
        let out = render(&[row(1965, 1.0, 1.0), row(1966, f64::NAN, 1.0), row(1967, 2.0, 2.0)]);
        for (_, runs) in out.areas() {
            assert_eq!(runs.len(), 2);
        }
    }

    #[test]
    fn callout_marks_midpoint_total() {
        let out = render(&[row(1965, 1.0, 1.0), row(1990, 3000.0, 500.0), row(2020, 5.0, 5.0)]);
        let callouts: Vec<_> = out.callouts().collect();
        assert_eq!(callouts, vec![([1990.0, 3500.0], "1990: 3,500 PJ")]);
    }
}
