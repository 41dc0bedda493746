//! Built isolines grouped by level.

use crate::filters::PointFilter;
use crate::geometry::{Point, Segment};
use serde::{Deserialize, Serialize};

/// One contour polyline at a single level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLine {
    /// Raw level value
    pub value: f64,
    /// Position of the level within the field's [min, max], in [0, 1]
    pub normalized_ratio: f64,
    /// Polyline vertices in data space
    pub points: Vec<Point>,
}

impl LevelLine {
    pub fn new(value: f64, normalized_ratio: f64, start: Point) -> Self {
        Self {
            value,
            normalized_ratio,
            points: vec![start],
        }
    }

    pub fn start_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// All vertices after the first.
    pub fn other_points(&self) -> &[Point] {
        self.points.get(1..).unwrap_or(&[])
    }

    /// Consecutive vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// A line is closed when it ends where it started.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first == last,
            _ => false,
        }
    }

    /// Replace the vertices with the output of a point filter.
    pub fn apply_filter(&mut self, filter: &dyn PointFilter) {
        let points = std::mem::take(&mut self.points);
        self.points = filter.filter(points);
    }
}

/// All lines produced by one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsolineCollection {
    lines: Vec<LevelLine>,
    levels: Vec<f64>,
    min: f64,
    max: f64,
}

impl IsolineCollection {
    pub(crate) fn new(levels: Vec<f64>, min: f64, max: f64) -> Self {
        Self {
            lines: Vec::new(),
            levels,
            min,
            max,
        }
    }

    pub(crate) fn start_line(&mut self, start: Point, normalized_ratio: f64, value: f64) {
        self.lines.push(LevelLine::new(value, normalized_ratio, start));
    }

    /// Append a vertex to the current line. A repeat of the last vertex is
    /// dropped so lines never hold zero-length segments.
    pub(crate) fn add_point(&mut self, point: Point) {
        if let Some(line) = self.lines.last_mut() {
            if line.points.last() != Some(&point) {
                line.points.push(point);
            }
        }
    }

    pub(crate) fn extend_lines(&mut self, lines: Vec<LevelLine>) {
        self.lines.extend(lines);
    }

    pub(crate) fn last_line(&self) -> Option<&LevelLine> {
        self.lines.last()
    }

    pub fn lines(&self) -> &[LevelLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LevelLine> {
        self.lines
    }

    /// Levels requested for this build, in build order.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Value range of the field the collection was built from.
    pub fn value_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Lines traced for one level.
    pub fn lines_at(&self, level: f64) -> impl Iterator<Item = &LevelLine> {
        self.lines.iter().filter(move |l| l.value == level)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.lines.iter().map(|l| l.points.len()).sum()
    }

    /// Copy of the collection with every line passed through `filter`.
    pub fn filtered(&self, filter: &dyn PointFilter) -> IsolineCollection {
        let mut filtered = self.clone();
        for line in &mut filtered.lines {
            line.apply_filter(filter);
        }
        filtered
    }
}
