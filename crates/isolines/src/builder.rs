//! Isoline extraction by cell tracking (marching squares).
//!
//! Instead of emitting independent per-cell segments and stitching them
//! afterwards, each line is followed from cell to cell as soon as one of its
//! edge crossings is found. Traced edges are remembered in a per-node
//! bitmask so every crossing belongs to exactly one line.

use std::sync::Arc;

use rayon::prelude::*;

use crate::cell::{crosses, exit_edge, Cell, Edge};
use crate::collection::{IsolineCollection, LevelLine};
use crate::config::IsolineConfig;
use crate::error::{IsolineError, Result};
use crate::field::ScalarField2D;
use crate::saddle::{self, SaddleFailure};

/// Number of automatically generated levels.
pub const DEFAULT_DENSITY: usize = 12;

/// Share of the value range kept free of levels at each end.
pub const LEVEL_MARGIN: f64 = 0.05;

/// Minimum nodes times levels to benefit from tracing levels in parallel
const PARALLEL_THRESHOLD: usize = 4096;

const PASSED_LEFT: u8 = 0b01;
const PASSED_BOTTOM: u8 = 0b10;

/// Generate `density` evenly spaced levels inside `[min, max]`.
///
/// The first and last levels sit [`LEVEL_MARGIN`] of the range inside the
/// bounds so they still cut the field. Returns no levels for an empty or
/// inverted range.
pub fn generate_levels(min: f64, max: f64, density: usize) -> Vec<f64> {
    if density == 0 || max <= min {
        return vec![];
    }

    let delta = max - min;
    let lo = min + delta * LEVEL_MARGIN;
    let hi = max - delta * LEVEL_MARGIN;

    if density == 1 {
        return vec![(lo + hi) * 0.5];
    }

    let step = (hi - lo) / (density - 1) as f64;
    (0..density)
        .map(|i| if i + 1 == density { hi } else { lo + i as f64 * step })
        .collect()
}

/// Builds isolines for the scalar field attached to it.
///
/// The builder keeps a scratch buffer sized to the grid between builds;
/// building takes `&mut self`, so one builder serves one build at a time.
#[derive(Debug, Clone)]
pub struct IsolineBuilder {
    field: Option<Arc<ScalarField2D>>,
    density: usize,
    passed: Vec<u8>,
}

impl Default for IsolineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IsolineBuilder {
    /// Create a builder with no field attached.
    pub fn new() -> Self {
        Self {
            field: None,
            density: DEFAULT_DENSITY,
            passed: Vec::new(),
        }
    }

    /// Create a builder for a field.
    pub fn with_field(field: impl Into<Arc<ScalarField2D>>) -> Self {
        let mut builder = Self::new();
        builder.set_field(field);
        builder
    }

    /// Create a builder using the density from a configuration.
    pub fn with_config(config: &IsolineConfig) -> Result<Self> {
        let mut builder = Self::new();
        builder.set_density(config.density)?;
        Ok(builder)
    }

    pub fn field(&self) -> Option<&Arc<ScalarField2D>> {
        self.field.as_ref()
    }

    /// Attach a new field. The next build reads it; nothing is cached.
    pub fn set_field(&mut self, field: impl Into<Arc<ScalarField2D>>) {
        self.field = Some(field.into());
    }

    pub fn clear_field(&mut self) {
        self.field = None;
    }

    pub fn density(&self) -> usize {
        self.density
    }

    pub fn set_density(&mut self, density: usize) -> Result<()> {
        if density == 0 {
            return Err(IsolineError::invalid_config("density must be at least 1"));
        }
        self.density = density;
        Ok(())
    }

    /// Levels `build` would trace for the attached field.
    pub fn levels(&self) -> Result<Vec<f64>> {
        let field = self.field.as_ref().ok_or(IsolineError::NoDataSource)?;
        let (min, max) = field.min_max();
        Ok(generate_levels(min, max, self.density))
    }

    /// Build isolines for `density` levels spread over the field's range.
    pub fn build(&mut self) -> Result<IsolineCollection> {
        let levels = self.levels()?;
        self.build_levels(&levels)
    }

    /// Build the isolines of a single level.
    pub fn build_level(&mut self, level: f64) -> Result<IsolineCollection> {
        self.build_levels(&[level])
    }

    /// Build isolines for an explicit list of levels.
    pub fn build_levels(&mut self, levels: &[f64]) -> Result<IsolineCollection> {
        let (field, mut collection) = self.prepare(levels)?;
        if field.width() < 2 || field.height() < 2 {
            return Ok(collection);
        }

        self.passed.clear();
        self.passed.resize(field.width() * field.height(), 0);

        for &level in levels {
            trace_level(&field, &mut self.passed, &mut collection, level)?;
        }

        tracing::debug!(
            num_lines = collection.len(),
            total_points = collection.total_points(),
            "built isolines"
        );

        Ok(collection)
    }

    /// Build isolines for `density` levels, tracing levels in parallel.
    pub fn build_parallel(&self) -> Result<IsolineCollection> {
        let levels = self.levels()?;
        self.build_levels_parallel(&levels)
    }

    /// Trace each level on the rayon pool with its own scratch buffer.
    ///
    /// Lines are gathered in level order, so the result equals
    /// [`build_levels`](Self::build_levels). When several levels fail, the
    /// error of any one of them is returned.
    pub fn build_levels_parallel(&self, levels: &[f64]) -> Result<IsolineCollection> {
        let (field, mut collection) = self.prepare(levels)?;
        if field.width() < 2 || field.height() < 2 {
            return Ok(collection);
        }

        let nodes = field.width() * field.height();
        if levels.len() < 2 || nodes * levels.len() < PARALLEL_THRESHOLD {
            let mut passed = vec![0u8; nodes];
            for &level in levels {
                trace_level(&field, &mut passed, &mut collection, level)?;
            }
            return Ok(collection);
        }

        let (min, max) = collection.value_range();
        let per_level = levels
            .par_iter()
            .map(|&level| -> Result<Vec<LevelLine>> {
                let mut passed = vec![0u8; nodes];
                let mut part = IsolineCollection::new(vec![level], min, max);
                trace_level(&field, &mut passed, &mut part, level)?;
                Ok(part.into_lines())
            })
            .collect::<Result<Vec<_>>>()?;

        for lines in per_level {
            collection.extend_lines(lines);
        }

        tracing::debug!(
            num_lines = collection.len(),
            total_points = collection.total_points(),
            threads = rayon::current_num_threads(),
            "built isolines in parallel"
        );

        Ok(collection)
    }

    /// Shared checks for every build: a field is attached, levels are finite.
    fn prepare(&self, levels: &[f64]) -> Result<(Arc<ScalarField2D>, IsolineCollection)> {
        let field = self.field.clone().ok_or(IsolineError::NoDataSource)?;

        if let Some(bad) = levels.iter().find(|l| !l.is_finite()) {
            return Err(IsolineError::invalid_config(format!(
                "isoline level must be finite, got {}",
                bad
            )));
        }

        let (min, max) = field.min_max();

        tracing::debug!(
            width = field.width(),
            height = field.height(),
            data_min = min,
            data_max = max,
            num_levels = levels.len(),
            "building isolines"
        );

        Ok((field, IsolineCollection::new(levels.to_vec(), min, max)))
    }
}

/// Trace every line of one level into `collection`.
///
/// `passed` must hold one entry per field node; it is reset here.
fn trace_level(
    field: &ScalarField2D,
    passed: &mut [u8],
    collection: &mut IsolineCollection,
    level: f64,
) -> Result<()> {
    let (min, max) = collection.value_range();
    let normalized_ratio = if max > min {
        ((level - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut tracer = LevelTracer {
        field,
        passed,
        collection,
        value: level,
        normalized_ratio,
    };

    tracer.trace_all().map_err(|err| {
        tracing::warn!(level, error = %err, "isoline build failed");
        err
    })
}

/// Scratch state for tracing one level.
struct LevelTracer<'a> {
    field: &'a ScalarField2D,
    passed: &'a mut [u8],
    collection: &'a mut IsolineCollection,
    value: f64,
    normalized_ratio: f64,
}

impl LevelTracer<'_> {
    fn node(&self, x: usize, y: usize) -> usize {
        y * self.field.width() + x
    }

    fn flag(&self, x: usize, y: usize, flag: u8) -> bool {
        self.passed[self.node(x, y)] & flag != 0
    }

    fn set_flag(&mut self, x: usize, y: usize, flag: u8) {
        let i = self.node(x, y);
        self.passed[i] |= flag;
    }

    /// Whether `edge` of cell `(x, y)` was traced. Grid boundaries always are.
    fn is_passed(&self, edge: Edge, x: usize, y: usize) -> bool {
        match edge {
            Edge::Left => x == 0 || self.flag(x, y, PASSED_LEFT),
            Edge::Bottom => y == 0 || self.flag(x, y, PASSED_BOTTOM),
            Edge::Top => y + 2 == self.field.height() || self.flag(x, y + 1, PASSED_BOTTOM),
            Edge::Right => x + 2 == self.field.width() || self.flag(x + 1, y, PASSED_LEFT),
        }
    }

    fn mark_passed(&mut self, edge: Edge, x: usize, y: usize) {
        match edge {
            Edge::Left => self.set_flag(x, y, PASSED_LEFT),
            Edge::Bottom => self.set_flag(x, y, PASSED_BOTTOM),
            Edge::Top => self.set_flag(x, y + 1, PASSED_BOTTOM),
            Edge::Right => self.set_flag(x + 1, y, PASSED_LEFT),
        }
    }

    fn crosses_nodes(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        crosses(self.field.value(a.0, a.1), self.field.value(b.0, b.1), self.value)
    }

    /// Scan every boundary once, then the interior horizontal edges.
    ///
    /// Lines touching the boundary are found first and traced end to end,
    /// so the interior scan only starts closed loops.
    fn trace_all(&mut self) -> Result<()> {
        self.passed.fill(0);

        let width = self.field.width();
        let height = self.field.height();
        let right = width - 1;
        let top = height - 1;

        for y in 0..top {
            if !self.flag(0, y, PASSED_LEFT) && self.crosses_nodes((0, y), (0, y + 1)) {
                self.track_line(Edge::Left, 0, y)?;
            }
        }

        for x in 0..right {
            if !self.flag(x, 0, PASSED_BOTTOM) && self.crosses_nodes((x, 0), (x + 1, 0)) {
                self.track_line(Edge::Bottom, x, 0)?;
            }
        }

        for y in 0..top {
            if !self.flag(right, y, PASSED_LEFT) && self.crosses_nodes((right, y), (right, y + 1)) {
                self.track_line(Edge::Right, right - 1, y)?;
            }
        }

        for x in 0..right {
            if !self.flag(x, top, PASSED_BOTTOM) && self.crosses_nodes((x, top), (x + 1, top)) {
                self.track_line(Edge::Top, x, top - 1)?;
            }
        }

        for y in (1..top).rev() {
            for x in 0..right {
                if !self.flag(x, y, PASSED_BOTTOM) && self.crosses_nodes((x, y), (x + 1, y)) {
                    self.track_line(Edge::Top, x, y - 1)?;
                }
            }
        }

        Ok(())
    }

    /// Follow one line that enters cell `(x, y)` through `entry`.
    fn track_line(&mut self, entry: Edge, x: usize, y: usize) -> Result<()> {
        let cell = Cell::from_field(self.field, x, y);
        let start = cell.crossing(entry, self.value);
        self.collection
            .start_line(start, self.normalized_ratio, self.value);
        self.mark_passed(entry, x, y);

        let mut state = (entry, x, y);
        while let Some(next) = self.step(state.0, state.1, state.2)? {
            state = next;
        }

        if let Some(line) = self.collection.last_line() {
            tracing::trace!(
                level = self.value,
                points = line.points.len(),
                closed = line.is_closed(),
                "traced isoline"
            );
        }
        Ok(())
    }

    /// Cross one cell. Returns the next cell and its entry edge, or `None`
    /// when the line closed or reached the boundary.
    fn step(&mut self, entry: Edge, x: usize, y: usize) -> Result<Option<(Edge, usize, usize)>> {
        let cell = Cell::from_field(self.field, x, y);
        let value = self.value;

        if !cell.contains_value(value) {
            return Err(IsolineError::ValueOutOfCell { value, x, y });
        }

        let mask = cell.mask(value);
        let exit = match exit_edge(entry, mask) {
            Some(exit) => exit,
            None if mask.is_saddle() => {
                let mut inner = Vec::new();
                let exit = saddle::resolve(&cell, entry, value, &mut inner).map_err(|failure| {
                    match failure {
                        SaddleFailure::ValueOutOfCell => IsolineError::ValueOutOfCell { value, x, y },
                        SaddleFailure::Undetailed => IsolineError::DataUndetailed { value, x, y },
                    }
                })?;
                for point in inner {
                    self.collection.add_point(point);
                }
                exit
            }
            None => return Err(IsolineError::ValueOutOfCell { value, x, y }),
        };

        self.collection.add_point(cell.crossing(exit, value));

        if self.is_passed(exit, x, y) {
            self.mark_passed(exit, x, y);
            return Ok(None);
        }
        self.mark_passed(exit, x, y);

        let next = match exit {
            Edge::Left => (Edge::Right, x - 1, y),
            Edge::Top => (Edge::Bottom, x, y + 1),
            Edge::Right => (Edge::Left, x + 1, y),
            Edge::Bottom => (Edge::Top, x, y - 1),
        };
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn unit_field(width: usize, height: usize, data: Vec<f64>) -> ScalarField2D {
        ScalarField2D::regular(width, height, data, Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .unwrap()
    }

    #[test]
    fn test_generate_levels_margins() {
        let levels = generate_levels(0.0, 100.0, 12);
        assert_eq!(levels.len(), 12);
        assert!((levels[0] - 5.0).abs() < 1e-12);
        assert_eq!(levels[11], 95.0);
        let step = levels[1] - levels[0];
        for w in levels.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }

    #[test]
    fn test_generate_levels_degenerate() {
        assert!(generate_levels(1.0, 1.0, 12).is_empty());
        assert!(generate_levels(2.0, 1.0, 12).is_empty());
        assert!(generate_levels(0.0, 1.0, 0).is_empty());
        assert_eq!(generate_levels(0.0, 10.0, 1), vec![5.0]);
    }

    #[test]
    fn test_boundary_cells_count_as_passed() {
        let field = unit_field(3, 3, vec![0.0; 9]);
        let mut passed = vec![0u8; 9];
        let mut collection = IsolineCollection::default();
        let tracer = LevelTracer {
            field: &field,
            passed: &mut passed,
            collection: &mut collection,
            value: 0.5,
            normalized_ratio: 0.0,
        };
        assert!(tracer.is_passed(Edge::Left, 0, 1));
        assert!(tracer.is_passed(Edge::Bottom, 1, 0));
        assert!(tracer.is_passed(Edge::Top, 0, 1));
        assert!(tracer.is_passed(Edge::Right, 1, 0));
        assert!(!tracer.is_passed(Edge::Right, 0, 0));
        assert!(!tracer.is_passed(Edge::Top, 0, 0));
    }

    #[test]
    fn test_mark_passed_shares_edges_with_neighbors() {
        let field = unit_field(3, 3, vec![0.0; 9]);
        let mut passed = vec![0u8; 9];
        let mut collection = IsolineCollection::default();
        let mut tracer = LevelTracer {
            field: &field,
            passed: &mut passed,
            collection: &mut collection,
            value: 0.5,
            normalized_ratio: 0.0,
        };
        tracer.mark_passed(Edge::Right, 0, 0);
        assert!(tracer.is_passed(Edge::Left, 1, 0));
        tracer.mark_passed(Edge::Top, 0, 0);
        assert!(tracer.is_passed(Edge::Bottom, 0, 1));
    }

    #[test]
    fn test_single_cell_corner() {
        // Only the right-top corner is high
        let field = unit_field(2, 2, vec![0.0, 0.0, 0.0, 10.0]);
        let mut builder = IsolineBuilder::with_field(field);
        let collection = builder.build_level(5.0).unwrap();

        assert_eq!(collection.len(), 1);
        let line = &collection.lines()[0];
        assert_eq!(line.points.len(), 2);
        assert_eq!(line.points[0], Point::new(1.0, 0.5));
        assert_eq!(line.points[1], Point::new(0.5, 1.0));
    }

    #[test]
    fn test_scratch_buffer_resizes_with_field() {
        let mut builder = IsolineBuilder::with_field(unit_field(2, 2, vec![0.0, 1.0, 0.0, 1.0]));
        assert_eq!(builder.build_level(0.5).unwrap().len(), 1);

        builder.set_field(unit_field(4, 2, vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]));
        let collection = builder.build_level(1.5).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(builder.passed.len(), 8);
    }
}
