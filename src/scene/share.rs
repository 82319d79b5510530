//! Scene 1: renewables share of primary energy, on a fixed 0–100% axis.

use super::draw::{DrawList, Mark, line_segments};
use super::format::{TickFormat, share_label};
use super::{SceneContext, push_axes};
use crate::data::model::DerivedRow;

/// First row whose share reaches `threshold`. Undefined shares never match.
pub fn milestone_row(rows: &[DerivedRow], threshold: f64) -> Option<&DerivedRow> {
    rows.iter()
        .find(|r| r.share().is_some_and(|s| s >= threshold))
}

pub fn draw(ctx: &SceneContext<'_>, out: &mut DrawList) {
    push_axes(ctx, "Renewables share of primary energy", TickFormat::Percent, out);

    let points = ctx.rows.iter().map(|r| [r.year as f64, r.renewables_share]);
    out.push(Mark::Line {
        name: "Renewables share".to_string(),
        segments: line_segments(points),
    });

    if ctx.annotations.hover_markers {
        for (r, share) in ctx.rows.iter().filter_map(|r| r.share().map(|s| (r, s))) {
            out.push(Mark::Marker {
                at: [r.year as f64, share],
                tooltip: share_label(r.year, share),
            });
        }
    }

    if ctx.annotations.callouts {
        if let Some(r) = milestone_row(ctx.rows, ctx.milestone_share) {
            out.push(Mark::Callout {
                anchor: [r.year as f64, r.renewables_share],
                offset: [-120.0, -40.0],
                label: share_label(r.year, r.renewables_share),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnnotationMode;
    use crate::data::domain::Scales;

    fn row(year: i32, share: f64) -> DerivedRow {
        DerivedRow {
            year,
            primary: 100.0,
            renewables_share: share,
            fossil: 0.0,
            zero_carbon: 0.0,
        }
    }

    fn render(rows: &[DerivedRow]) -> DrawList {
        let mut scales = Scales::for_area(0.0, 100.0, 0.0, 100.0);
        scales.y.domain = (0.0, 100.0);
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
    fn milestone_is_first_row_at_or_above_threshold() {
        let rows = vec![row(2014, 9.1), row(2015, f64::NAN), row(2016, 10.24), row(2017, 11.0)];
        assert_eq!(milestone_row(&rows, 10.0).map(|r| r.year), Some(2016));

        let out = render(&rows);
        let callouts: Vec<_> = out.callouts().collect();
        assert_eq!(callouts, vec![([2016.0, 10.24], "2016: 10.2%")]);
    }

    #[test]
    fn no_milestone_omits_callout() {
        let rows = vec![row(2000, 1.0), row(2001, 2.0)];
        assert!(milestone_row(&rows, 10.0).is_none());
        assert_eq!(render(&rows).callouts().count(), 0);
    }

    #[test]
    fn undefined_share_breaks_line_and_skips_marker() {
        let rows = vec![row(2000, 1.0), row(2001, f64::NAN), row(2002, 3.0)];
        let out = render(&rows);
        let segments: Vec<_> = out.lines().collect();
        assert_eq!(segments[0].len(), 2);
        assert_eq!(out.markers().count(), 2);
    }

    #[test]
    fn percent_axis_ticks() {
        let out = render(&[row(2000, 1.0)]);
        let left = out.axes().find(|a| a.format == TickFormat::Percent).unwrap();
        assert_eq!(left.ticks.first().map(|t| t.label.as_str()), Some("0%"));
        assert_eq!(left.ticks.last().map(|t| t.label.as_str()), Some("100%"));
    }
}
