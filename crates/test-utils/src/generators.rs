//! Scalar field generators with predictable contours.
//!
//! All generators sample node `(col, row)` at integer coordinates and return
//! a `Vec<f64>` in row-major order (row 0 first, row 0 being the bottom of
//! the field).

/// Creates a ramp `value = col * dx + row * dy`.
///
/// Every level between the extremes is a single straight line.
pub fn create_ramp_grid(width: usize, height: usize, dx: f64, dy: f64) -> Vec<f64> {
    sample(width, height, |col, row| col * dx + row * dy)
}

/// Creates a grid holding the distance of each node from `(cx, cy)`.
///
/// Levels smaller than the distance to the nearest border give closed
/// circles.
pub fn create_radial_grid(width: usize, height: usize, cx: f64, cy: f64) -> Vec<f64> {
    sample(width, height, |col, row| (col - cx).hypot(row - cy))
}

/// Creates a checkerboard of high and low nodes.
///
/// Every cell is a saddle for any level strictly between `low` and `high`.
pub fn create_saddle_grid(width: usize, height: usize, low: f64, high: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(if (col + row) % 2 == 0 { high } else { low });
        }
    }
    data
}

/// Creates smooth hills `sin(col / period) * cos(row / period) * amplitude`.
///
/// Useful for benchmarks: many closed and open lines with a few saddles.
pub fn create_hills_grid(width: usize, height: usize, period: f64, amplitude: f64) -> Vec<f64> {
    sample(width, height, |col, row| {
        (col / period).sin() * (row / period).cos() * amplitude
    })
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

fn sample(width: usize, height: usize, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(f(col as f64, row as f64));
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_grid() {
        let grid = create_ramp_grid(3, 2, 1.0, 10.0);
        assert_eq!(grid, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_radial_grid_center() {
        let grid = create_radial_grid(5, 5, 2.0, 2.0);
        assert_eq!(grid[2 * 5 + 2], 0.0);
        assert!((grid[0] - 8.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_saddle_grid_alternates() {
        let grid = create_saddle_grid(2, 2, 0.0, 10.0);
        assert_eq!(grid, vec![10.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_hills_grid_range() {
        let grid = create_hills_grid(50, 50, 4.0, 3.0);
        assert!(grid.iter().all(|v| v.abs() <= 3.0));
    }

    #[test]
    fn test_constant_grid() {
        let grid = create_constant_grid(4, 3, 7.5);
        assert_eq!(grid.len(), 12);
        assert!(grid.iter().all(|&v| v == 7.5));
    }
}
