//! Scene 0: primary energy consumption as a single line.

use super::draw::{DrawList, Mark, line_segments};
use super::format::{TickFormat, energy_label};
use super::{SceneContext, push_axes};

pub fn draw(ctx: &SceneContext<'_>, out: &mut DrawList) {
    push_axes(ctx, "Primary energy (PJ)", TickFormat::Thousands, out);

    let points = ctx.rows.iter().map(|r| [r.year as f64, r.primary]);
    out.push(Mark::Line {
        name: "Primary energy".to_string(),
        segments: line_segments(points),
    });

    if ctx.annotations.hover_markers {
        for r in ctx.rows.iter().filter(|r| r.primary.is_finite()) {
            out.push(Mark::Marker {
                at: [r.year as f64, r.primary],
                tooltip: energy_label(r.year, r.primary),
            });
        }
    }

    if ctx.annotations.callouts {
        if let Some(last) = ctx.rows.iter().rev().find(|r| r.primary.is_finite()) {
            out.push(Mark::Callout {
                anchor: [last.year as f64, last.primary],
                offset: [-140.0, 30.0],
                label: energy_label(last.year, last.primary),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnnotationMode;
    use crate::data::domain::Scales;
    use crate::data::model::DerivedRow;

    fn rows() -> Vec<DerivedRow> {
        [(1965, 43360.0), (1966, f64::NAN), (1967, 45000.0), (1968, 46500.0)]
            .into_iter()
            .map(|(year, primary)| DerivedRow {
                year,
                primary,
                renewables_share: 1.0,
                fossil: 0.0,
                zero_carbon: 0.0,
            })
            .collect()
    }

    fn render(rows: &[DerivedRow], annotations: AnnotationMode) -> DrawList {
        let scales = Scales::for_area(0.0, 100.0, 0.0, 100.0);
        let ctx = SceneContext {
            rows,
            scales: &scales,
            annotations,
            milestone_share: 10.0,
        };
        let mut out = DrawList::new();
        draw(&ctx, &mut out);
        out
    }

    #[test]
    fn line_breaks_at_undefined_primary() {
        let out = render(&rows(), AnnotationMode::default());
        let segments: Vec<_> = out.lines().collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[0][1].len(), 2);
        assert_eq!(out.markers().count(), 3);
    }

    #[test]
    fn callout_marks_last_defined_year() {
        let out = render(&rows(), AnnotationMode::default());
        let callouts: Vec<_> = out.callouts().collect();
        assert_eq!(callouts, vec![([1968.0, 46500.0], "1968: 46,500 PJ")]);
    }

    #[test]
    fn annotations_can_be_switched_off() {
        let out = render(
            &rows(),
            AnnotationMode {
                hover_markers: false,
                callouts: false,
            },
        );
        assert_eq!(out.markers().count(), 0);
        assert_eq!(out.callouts().count(), 0);
        assert_eq!(out.axes().count(), 2);
    }
}
