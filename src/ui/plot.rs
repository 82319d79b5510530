use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{Align2, RichText, Stroke, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use energy_story::color::{callout_color, line_color, tone_color, with_alpha};
use energy_story::scene::draw::{AxisSide, Mark, Point};
use energy_story::scene::format::TickFormat;
use energy_story::state::AppState;

// ---------------------------------------------------------------------------
// Scene chart (central panel)
// ---------------------------------------------------------------------------

/// Where callout text sits relative to its anchor, from the pixel offset.
fn callout_anchor(offset: [f64; 2]) -> Align2 {
    match (offset[0] < 0.0, offset[1] < 0.0) {
        (true, true) => Align2::RIGHT_BOTTOM,
        (true, false) => Align2::RIGHT_TOP,
        (false, true) => Align2::LEFT_BOTTOM,
        (false, false) => Align2::LEFT_TOP,
    }
}

/// Render the current scene's draw list in the central panel.
pub fn scene_plot(ui: &mut Ui, state: &AppState) {
    let controller = &state.controller;
    let Some(scene) = controller.current_scene() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an energy table to start the story  (File → Open…)");
        });
        return;
    };

    let list = controller.draw_list();
    let scales = controller.scales();

    let mut x_label = String::new();
    let mut y_label = String::new();
    let mut y_format = TickFormat::Thousands;
    for axis in list.axes() {
        match axis.side {
            AxisSide::Bottom => x_label = axis.label.clone(),
            AxisSide::Left => {
                y_label = axis.label.clone();
                y_format = axis.format;
            }
        }
    }

    // Hover text is keyed by year so every series at that year shows the scene's tooltip.
    let tooltips: BTreeMap<i64, String> = list
        .markers()
        .map(|(p, text)| (p[0].round() as i64, text.to_string()))
        .collect();
    let marker_points: Vec<Point> = list.markers().map(|(p, _)| p).collect();

    let (x0, x1) = scales.x.domain;
    let (y0, y1) = scales.y.domain;

    Plot::new(("scene_plot", scene.index))
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            TickFormat::Year.format(mark.value)
        })
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            y_format.format(mark.value)
        })
        .label_formatter(move |_name: &str, point: &PlotPoint| {
            tooltips
                .get(&(point.x.round() as i64))
                .cloned()
                .unwrap_or_default()
        })
        .include_x(x0)
        .include_x(x1)
        .include_y(y0)
        .include_y(y1)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for mark in list.marks() {
                match mark {
                    Mark::Area { name, tone, runs } => {
                        let fill = with_alpha(tone_color(*tone), 210);
                        // One quad per year interval keeps every polygon convex.
                        for run in runs {
                            for (lo, hi) in run.lower.windows(2).zip(run.upper.windows(2)) {
                                let quad = vec![lo[0], lo[1], hi[1], hi[0]];
                                plot_ui.polygon(
                                    Polygon::new(PlotPoints::from(quad))
                                        .name(name)
                                        .fill_color(fill)
                                        .stroke(Stroke::new(0.5, fill)),
                                );
                            }
                        }
                    }
                    Mark::Line { name, segments } => {
                        for segment in segments {
                            plot_ui.line(
                                Line::new(PlotPoints::from(segment.clone()))
                                    .name(name)
                                    .color(line_color())
                                    .width(2.0),
                            );
                        }
                    }
                    Mark::Callout {
                        anchor,
                        offset,
                        label,
                    } => {
                        plot_ui.points(
                            Points::new(vec![*anchor])
                                .radius(5.0)
                                .filled(false)
                                .color(callout_color()),
                        );
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(anchor[0], anchor[1]),
                                RichText::new(label).strong().color(callout_color()),
                            )
                            .anchor(callout_anchor(*offset)),
                        );
                    }
                    Mark::Marker { .. } | Mark::Axis(_) => {}
                }
            }

            if !marker_points.is_empty() {
                plot_ui.points(
                    Points::new(marker_points)
                        .radius(2.5)
                        .color(line_color())
                        .name("Data points"),
                );
            }
        });
}
