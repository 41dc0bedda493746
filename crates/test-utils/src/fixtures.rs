//! Common fixtures for isoline tests.

/// Grid layouts used across the test suite.
pub mod grid {
    /// Smallest grid with a cell
    pub const SINGLE_CELL: GridSpec = GridSpec {
        width: 2,
        height: 2,
        origin: (0.0, 0.0),
        step: (1.0, 1.0),
    };

    /// Simple 11x11 grid on integer coordinates 0..=10
    pub const SIMPLE_11X11: GridSpec = GridSpec {
        width: 11,
        height: 11,
        origin: (0.0, 0.0),
        step: (1.0, 1.0),
    };

    /// Non-square grid with non-unit spacing
    pub const STRETCHED: GridSpec = GridSpec {
        width: 21,
        height: 6,
        origin: (-10.0, 100.0),
        step: (0.5, 2.0),
    };

    /// A single column; no cells
    pub const DEGENERATE_COLUMN: GridSpec = GridSpec {
        width: 1,
        height: 8,
        origin: (0.0, 0.0),
        step: (1.0, 1.0),
    };

    /// Benchmark sized grid
    pub const BENCH_256: GridSpec = GridSpec {
        width: 256,
        height: 256,
        origin: (0.0, 0.0),
        step: (1.0, 1.0),
    };

    /// Regular grid specification for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub width: usize,
        pub height: usize,
        pub origin: (f64, f64),
        pub step: (f64, f64),
    }

    impl GridSpec {
        /// Returns the total number of nodes.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        /// Returns the number of cells.
        pub fn cells(&self) -> usize {
            self.width.saturating_sub(1) * self.height.saturating_sub(1)
        }

        /// Returns the extent as (min_x, min_y, max_x, max_y).
        pub fn bounds(&self) -> (f64, f64, f64, f64) {
            let max_x = self.origin.0 + self.step.0 * self.width.saturating_sub(1) as f64;
            let max_y = self.origin.1 + self.step.1 * self.height.saturating_sub(1) as f64;
            (self.origin.0, self.origin.1, max_x, max_y)
        }
    }
}

/// Single cells with known topology, values given as
/// (left_top, right_top, right_bottom, left_bottom).
pub mod cells {
    /// Left-bottom and right-top above 5
    pub const SADDLE: (f64, f64, f64, f64) = (0.0, 10.0, 0.0, 10.0);

    /// Only right-top above 5
    pub const SINGLE_CORNER: (f64, f64, f64, f64) = (0.0, 10.0, 0.0, 0.0);

    /// Right half above 5
    pub const VERTICAL_SPLIT: (f64, f64, f64, f64) = (0.0, 10.0, 10.0, 0.0);

    /// Saddle at 5 whose bilinear saddle value is exactly 5
    pub const DEGENERATE_SADDLE: (f64, f64, f64, f64) = (5.3, 4.2, 8.2, 3.8);

    /// Converts corner values to row-major 2x2 data (bottom row first).
    pub fn to_row_major(cell: (f64, f64, f64, f64)) -> Vec<f64> {
        let (lt, rt, rb, lb) = cell;
        vec![lb, rb, lt, rt]
    }
}
