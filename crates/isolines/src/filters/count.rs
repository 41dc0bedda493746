use super::PointFilter;
use crate::geometry::Point;

/// Default cap on points per line.
pub const DEFAULT_MAX_COUNT: usize = 300;

/// Keeps every Nth point so that at most `max_count` remain.
#[derive(Debug, Clone, PartialEq)]
pub struct CountFilter {
    pub max_count: usize,
}

impl Default for CountFilter {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl CountFilter {
    pub fn new(max_count: usize) -> Self {
        Self { max_count }
    }
}

impl PointFilter for CountFilter {
    fn filter(&self, points: Vec<Point>) -> Vec<Point> {
        if self.max_count == 0 {
            return Vec::new();
        }
        if points.len() <= self.max_count {
            return points;
        }

        // Rounded up so the result never exceeds max_count
        let step = points.len().div_ceil(self.max_count);
        points.into_iter().step_by(step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_short_input_untouched() {
        let filter = CountFilter::new(10);
        assert_eq!(filter.filter(line(10)), line(10));
    }

    #[test]
    fn test_decimation_step() {
        let filter = CountFilter::new(300);
        let out = filter.filter(line(650));
        // step 3: indices 0, 3, 6, ...
        assert_eq!(out.len(), 217);
        assert_eq!(out[1].x, 3.0);
    }

    #[test]
    fn test_zero_max_count() {
        assert!(CountFilter::new(0).filter(line(5)).is_empty());
    }
}
