use super::format::TickFormat;

// ---------------------------------------------------------------------------
// Marks – the retained output of a scene render
// ---------------------------------------------------------------------------

/// A point in data coordinates: `[year, value]`.
pub type Point = [f64; 2];

/// Fill identifiers for stacked layers. Colours are resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillTone {
    /// Neutral base layer.
    Fossil,
    /// Positive-toned layer stacked on top.
    ZeroCarbon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub side: AxisSide,
    pub label: String,
    pub format: TickFormat,
    pub ticks: Vec<Tick>,
}

/// One contiguous stretch of a filled layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaRun {
    pub lower: Vec<Point>,
    pub upper: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// A polyline broken into runs of consecutive defined points.
    Line { name: String, segments: Vec<Vec<Point>> },
    /// A filled band between two boundaries, broken the same way.
    Area {
        name: String,
        tone: FillTone,
        runs: Vec<AreaRun>,
    },
    /// A hoverable point.
    Marker { at: Point, tooltip: String },
    /// A static annotation; `offset` is in pixels from the anchor.
    Callout {
        anchor: Point,
        offset: [f64; 2],
        label: String,
    },
    Axis(Axis),
}

/// Everything currently drawn on the chart surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    marks: Vec<Mark>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Remove every mark.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &[Vec<Point>]> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Line { segments, .. } => Some(segments.as_slice()),
            _ => None,
        })
    }

    pub fn areas(&self) -> impl Iterator<Item = (FillTone, &[AreaRun])> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Area { tone, runs, .. } => Some((*tone, runs.as_slice())),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (Point, &str)> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Marker { at, tooltip } => Some((*at, tooltip.as_str())),
            _ => None,
        })
    }

    pub fn callouts(&self) -> impl Iterator<Item = (Point, &str)> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Callout { anchor, label, .. } => Some((*anchor, label.as_str())),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Axis(axis) => Some(axis),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Gap handling
// ---------------------------------------------------------------------------

fn defined(p: &Point) -> bool {
    p[0].is_finite() && p[1].is_finite()
}

/// Split a series into runs of consecutive defined points. An undefined
/// point ends the current run, so no segment ever bridges a gap.
pub fn line_segments(points: impl IntoIterator<Item = Point>) -> Vec<Vec<Point>> {
    let mut segments = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for p in points {
        if defined(&p) {
            current.push(p);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Split `(x, lower, upper)` triples into runs where both boundaries are defined.
pub fn area_runs(points: impl IntoIterator<Item = (f64, f64, f64)>) -> Vec<AreaRun> {
    let mut runs = Vec::new();
    let mut current = AreaRun::default();
    for (x, lower, upper) in points {
        let lo = [x, lower];
        let hi = [x, upper];
        if defined(&lo) && defined(&hi) {
            current.lower.push(lo);
            current.upper.push(hi);
        } else if !current.lower.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.lower.is_empty() {
        runs.push(current);
    }
    runs
}
