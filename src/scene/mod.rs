//! Scene registry: the fixed, ordered sequence of chart views.
//!
//! Each scene is plain data plus a draw routine. The controller configures
//! the shared scales (x once per dataset, y from [`SceneDescriptor::y_domain`])
//! and then hands the draw routine the dataset, the scales and an empty
//! [`DrawList`]:
//! ```text
//!   &[DerivedRow] + &Scales ──► draw ──► DrawList ──► egui plot / SVG
//! ```

pub mod composition;
pub mod draw;
pub mod format;
pub mod magnitude;
pub mod share;

use crate::config::AnnotationMode;
use crate::data::domain::{Scales, YDomain};
use crate::data::model::{DerivedRow, Metric};

use draw::{Axis, AxisSide, DrawList, Mark, Tick};
use format::TickFormat;

/// Approximate tick count per axis.
const TICKS: usize = 6;

/// Everything a draw routine may read.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub rows: &'a [DerivedRow],
    pub scales: &'a Scales,
    pub annotations: AnnotationMode,
    /// Share (percent) marked by the share scene's milestone callout.
    pub milestone_share: f64,
}

pub type DrawFn = fn(&SceneContext<'_>, &mut DrawList);

pub struct SceneDescriptor {
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub y_domain: YDomain,
    pub draw: DrawFn,
}

impl std::fmt::Debug for SceneDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDescriptor")
            .field("index", &self.index)
            .field("title", &self.title)
            .field("y_domain", &self.y_domain)
            .finish_non_exhaustive()
    }
}

pub const SCENE_COUNT: usize = 3;

pub static SCENES: [SceneDescriptor; SCENE_COUNT] = [
    SceneDescriptor {
        index: 0,
        title: "The world keeps using more energy",
        description: "Worldwide primary energy consumption has roughly quadrupled since 1965. \
                      Every year on the chart is the global total, in petajoules.",
        metric: Metric::Primary,
        y_domain: YDomain::ZeroToMax(Metric::Primary),
        draw: magnitude::draw,
    },
    SceneDescriptor {
        index: 1,
        title: "Renewables are catching up",
        description: "Renewables' share of primary energy stayed in the low single digits for \
                      decades before climbing past ten percent.",
        metric: Metric::RenewablesShare,
        y_domain: YDomain::Fixed(0.0, 100.0),
        draw: share::draw,
    },
    SceneDescriptor {
        index: 2,
        title: "Fossil fuels still carry the load",
        description: "Stacking fossil fuels under nuclear and renewables shows how much of the \
                      total still burns coal, oil and gas.",
        metric: Metric::StackedTotal,
        y_domain: YDomain::ZeroToMax(Metric::StackedTotal),
        draw: composition::draw,
    },
];

/// Emit the year axis and a value axis with ticks from the configured scales.
pub(crate) fn push_axes(ctx: &SceneContext<'_>, y_label: &str, y_format: TickFormat, out: &mut DrawList) {
    let ticks = |values: Vec<f64>, format: TickFormat| -> Vec<Tick> {
        values
            .into_iter()
            .map(|value| Tick {
                value,
                label: format.format(value),
            })
            .collect()
    };

    out.push(Mark::Axis(Axis {
        side: AxisSide::Bottom,
        label: "Year".to_string(),
        format: TickFormat::Year,
        ticks: ticks(ctx.scales.x.ticks(TICKS), TickFormat::Year),
    }));
    out.push(Mark::Axis(Axis {
        side: AxisSide::Left,
        label: y_label.to_string(),
        format: y_format,
        ticks: ticks(ctx.scales.y.ticks(TICKS), y_format),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_by_index() {
        for (i, scene) in SCENES.iter().enumerate() {
            assert_eq!(scene.index, i);
            assert!(!scene.title.is_empty());
            assert!(!scene.description.is_empty());
        }
    }

    #[test]
    fn share_scene_has_fixed_percentage_domain() {
        assert_eq!(SCENES[1].y_domain, YDomain::Fixed(0.0, 100.0));
        assert_eq!(SCENES[2].y_domain, YDomain::ZeroToMax(Metric::StackedTotal));
    }
}
