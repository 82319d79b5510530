use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::color::{callout_color, line_color, to_hex, tone_color};
use crate::config::ChartGeometry;
use crate::data::domain::Scales;
use crate::scene::draw::{Axis, AxisSide, DrawList, Mark, Point};

const TICK_LENGTH: f64 = 6.0;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn path_data(points: &[Point], scales: &Scales) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let [x, y] = scales.project(*p);
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{x:.2},{y:.2}");
    }
    d
}

fn polygon_points(upper: &[Point], lower: &[Point], scales: &Scales) -> String {
    upper
        .iter()
        .chain(lower.iter().rev())
        .map(|p| {
            let [x, y] = scales.project(*p);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_axis(svg: &mut String, axis: &Axis, scales: &Scales) {
    let (x0, x1) = scales.x.range;
    let (y_bottom, y_top) = scales.y.range;
    let _ = writeln!(svg, r#"<g class="axis" font-size="11">"#);
    match axis.side {
        AxisSide::Bottom => {
            let _ = writeln!(
                svg,
                r#"<line x1="{x0:.2}" y1="{y_bottom:.2}" x2="{x1:.2}" y2="{y_bottom:.2}" stroke="black"/>"#
            );
            for tick in &axis.ticks {
                let x = scales.x.map(tick.value);
                let _ = writeln!(
                    svg,
                    r#"<line x1="{x:.2}" y1="{y_bottom:.2}" x2="{x:.2}" y2="{:.2}" stroke="black"/><text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                    y_bottom + TICK_LENGTH,
                    y_bottom + TICK_LENGTH + 12.0,
                    escape(&tick.label)
                );
            }
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                (x0 + x1) / 2.0,
                y_bottom + 38.0,
                escape(&axis.label)
            );
        }
        AxisSide::Left => {
            let _ = writeln!(
                svg,
                r#"<line x1="{x0:.2}" y1="{y_bottom:.2}" x2="{x0:.2}" y2="{y_top:.2}" stroke="black"/>"#
            );
            for tick in &axis.ticks {
                let y = scales.y.map(tick.value);
                let _ = writeln!(
                    svg,
                    r#"<line x1="{:.2}" y1="{y:.2}" x2="{x0:.2}" y2="{y:.2}" stroke="black"/><text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                    x0 - TICK_LENGTH,
                    x0 - TICK_LENGTH - 3.0,
                    y + 4.0,
                    escape(&tick.label)
                );
            }
            let _ = writeln!(
                svg,
                r#"<text transform="translate({:.2},{:.2}) rotate(-90)" text-anchor="middle">{}</text>"#,
                x0 - 64.0,
                (y_bottom + y_top) / 2.0,
                escape(&axis.label)
            );
        }
    }
    let _ = writeln!(svg, "</g>");
}

/// Render a draw list as a standalone SVG document.
///
/// Data points are projected through `scales`; the document is sized by
/// `geometry`.
pub fn to_svg(list: &DrawList, scales: &Scales, geometry: &ChartGeometry, title: &str) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = geometry.width,
        h = geometry.height
    );
    let _ = writeln!(svg, "<title>{}</title>", escape(title));
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" font-size="16" font-weight="bold">{}</text>"#,
        geometry.margin_left,
        geometry.margin_top / 2.0 + 6.0,
        escape(title)
    );

    let line = to_hex(line_color());
    let accent = to_hex(callout_color());

    for mark in list.marks() {
        match mark {
            Mark::Area { name, tone, runs } => {
                let fill = to_hex(tone_color(*tone));
                for run in runs {
                    let _ = writeln!(
                        svg,
                        r#"<polygon class="area" fill="{fill}" points="{}"><title>{}</title></polygon>"#,
                        polygon_points(&run.upper, &run.lower, scales),
                        escape(name)
                    );
                }
            }
            Mark::Line { segments, .. } => {
                for segment in segments.iter().filter(|s| s.len() > 1) {
                    let _ = writeln!(
                        svg,
                        r#"<path class="line" fill="none" stroke="{line}" stroke-width="2" d="{}"/>"#,
                        path_data(segment, scales)
                    );
                }
            }
            Mark::Marker { at, tooltip } => {
                let [x, y] = scales.project(*at);
                let _ = writeln!(
                    svg,
                    r#"<circle class="marker" cx="{x:.2}" cy="{y:.2}" r="3" fill="{line}"><title>{}</title></circle>"#,
                    escape(tooltip)
                );
            }
            Mark::Callout {
                anchor,
                offset,
                label,
            } => {
                let [x, y] = scales.project(*anchor);
                let (tx, ty) = (x + offset[0], y + offset[1]);
                let _ = writeln!(
                    svg,
                    r#"<g class="callout"><line x1="{x:.2}" y1="{y:.2}" x2="{tx:.2}" y2="{ty:.2}" stroke="{accent}"/><circle cx="{x:.2}" cy="{y:.2}" r="4" fill="none" stroke="{accent}"/><text x="{tx:.2}" y="{ty:.2}" font-size="12" fill="{accent}">{}</text></g>"#,
                    escape(label)
                );
            }
            Mark::Axis(axis) => write_axis(&mut svg, axis, scales),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG rendition of `list` to `path`.
pub fn export_svg(
    path: &Path,
    list: &DrawList,
    scales: &Scales,
    geometry: &ChartGeometry,
    title: &str,
) -> Result<()> {
    let svg = to_svg(list, scales, geometry, title);
    std::fs::write(path, svg).with_context(|| format!("writing SVG to {}", path.display()))
}
