//! Gridded 2D scalar fields.
//!
//! A field pairs a value with a physical position at every grid node. The
//! grid does not have to be regular: any quadrilateral mesh works as long as
//! node `(x, y)` neighbours `(x + 1, y)` and `(x, y + 1)`.
//!
//! Node storage is row-major with `y = 0` as the bottom row, so cell `(x, y)`
//! has its left-bottom corner at node `(x, y)` and its left-top corner at
//! node `(x, y + 1)`.

use crate::cell::Cell;
use crate::error::{IsolineError, Result};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A scalar value sampled on a (possibly irregular) grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField2D {
    width: usize,
    height: usize,
    data: Vec<f64>,
    grid: Vec<Point>,
}

impl ScalarField2D {
    /// Create a field from node values and node positions.
    ///
    /// Both buffers are row-major and must hold `width * height` entries.
    /// NaN values or positions are rejected.
    pub fn new(width: usize, height: usize, data: Vec<f64>, grid: Vec<Point>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(IsolineError::invalid_field(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected = width * height;
        if data.len() != expected {
            return Err(IsolineError::invalid_field(format!(
                "expected {} values for a {}x{} grid, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        if grid.len() != expected {
            return Err(IsolineError::invalid_field(format!(
                "expected {} grid positions for a {}x{} grid, got {}",
                expected,
                width,
                height,
                grid.len()
            )));
        }

        if let Some(i) = data.iter().position(|v| v.is_nan()) {
            return Err(IsolineError::invalid_field(format!(
                "NaN value at node ({}, {})",
                i % width,
                i / width
            )));
        }
        if let Some(i) = grid.iter().position(|p| p.x.is_nan() || p.y.is_nan()) {
            return Err(IsolineError::invalid_field(format!(
                "NaN position at node ({}, {})",
                i % width,
                i / width
            )));
        }

        Ok(Self {
            width,
            height,
            data,
            grid,
        })
    }

    /// Create a field on an evenly spaced grid.
    ///
    /// Node `(x, y)` sits at `origin + (x * step.x, y * step.y)`.
    pub fn regular(
        width: usize,
        height: usize,
        data: Vec<f64>,
        origin: Point,
        step: Point,
    ) -> Result<Self> {
        let grid = regular_grid(width, height, origin, step);
        Self::new(width, height, data, grid)
    }

    /// Create a field on an evenly spaced grid by sampling `f` at each node.
    pub fn from_fn<F>(width: usize, height: usize, origin: Point, step: Point, f: F) -> Result<Self>
    where
        F: Fn(Point) -> f64,
    {
        let grid = regular_grid(width, height, origin, step);
        let data = grid.iter().map(|&p| f(p)).collect();
        Self::new(width, height, data, grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Node values, row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Node positions, row-major.
    pub fn grid(&self) -> &[Point] {
        &self.grid
    }

    /// Value at node `(x, y)`. Panics when out of range.
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Position of node `(x, y)`. Panics when out of range.
    pub fn position(&self, x: usize, y: usize) -> Point {
        self.grid[y * self.width + x]
    }

    /// Number of cells along x and y.
    pub fn cell_dims(&self) -> (usize, usize) {
        (self.width.saturating_sub(1), self.height.saturating_sub(1))
    }

    /// Corner values and positions of cell `(x, y)`, if it exists.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        let (cells_x, cells_y) = self.cell_dims();
        if x >= cells_x || y >= cells_y {
            return None;
        }
        Some(Cell::from_field(self, x, y))
    }

    /// Smallest and largest node value.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Bounding rectangle of all node positions.
    pub fn grid_bounds(&self) -> Rect {
        let (min, max) = self.grid.iter().fold(
            (
                Point::new(f64::INFINITY, f64::INFINITY),
                Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        Rect::from_corners(min, max)
    }
}

fn regular_grid(width: usize, height: usize, origin: Point, step: Point) -> Vec<Point> {
    let mut grid = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            grid.push(Point::new(
                origin.x + x as f64 * step.x,
                origin.y + y as f64 * step.y,
            ));
        }
    }
    grid
}
