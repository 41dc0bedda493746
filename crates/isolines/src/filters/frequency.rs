use super::PointFilter;
use crate::geometry::{Point, Rect};

/// Collapses runs of points that share an integer X column.
///
/// Dense polylines sampled far more finely than the visible width are
/// reduced to at most four points per column: the leftmost, the lowest and
/// highest in X order, and the rightmost. The filter is a no-op unless the
/// input has more than two points per unit of visible width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyFilter {
    visible: Rect,
}

impl FrequencyFilter {
    pub fn new(visible: Rect) -> Self {
        Self { visible }
    }

    pub fn visible_rect(&self) -> Rect {
        self.visible
    }
}

fn push_distinct(out: &mut Vec<Point>, point: Point) {
    if out.last() != Some(&point) {
        out.push(point);
    }
}

fn flush_chain(chain: &[Point], out: &mut Vec<Point>) {
    if chain.len() <= 2 {
        out.extend_from_slice(chain);
        return;
    }

    let by_x = |a: &&Point, b: &&Point| a.x.total_cmp(&b.x);
    let by_y = |a: &&Point, b: &&Point| a.y.total_cmp(&b.y);

    // Reversed comparators so ties keep the first maximum
    let (Some(first), Some(last), Some(low), Some(high)) = (
        chain.iter().min_by(by_x),
        chain.iter().min_by(|a, b| by_x(b, a)),
        chain.iter().min_by(by_y),
        chain.iter().min_by(|a, b| by_y(b, a)),
    ) else {
        return;
    };

    let (earlier, later) = if low.x <= high.x { (low, high) } else { (high, low) };

    out.push(*first);
    push_distinct(out, *earlier);
    push_distinct(out, *later);
    push_distinct(out, *last);
}

impl PointFilter for FrequencyFilter {
    fn set_visible_rect(&mut self, visible: Rect) {
        self.visible = visible;
    }

    fn filter(&self, points: Vec<Point>) -> Vec<Point> {
        if (points.len() as f64) <= 2.0 * self.visible.width {
            return points;
        }

        let mut out = Vec::with_capacity(points.len());
        let mut chain: Vec<Point> = Vec::new();
        let mut column = f64::NAN;

        for point in points {
            let x = point.x.floor();
            if x != column && !chain.is_empty() {
                flush_chain(&chain, &mut out);
                chain.clear();
            }
            column = x;
            chain.push(point);
        }
        flush_chain(&chain, &mut out);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_input_untouched() {
        let filter = FrequencyFilter::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64 * 0.1, 0.0)).collect();
        assert_eq!(filter.filter(points.clone()), points);
    }

    #[test]
    fn test_column_reduced_to_extremes() {
        let filter = FrequencyFilter::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        let points = vec![
            Point::new(0.1, 0.5),
            Point::new(0.2, 0.0),
            Point::new(0.3, 0.4),
            Point::new(0.4, 1.0),
            Point::new(0.5, 0.6),
        ];
        let out = filter.filter(points);
        assert_eq!(
            out,
            vec![
                Point::new(0.1, 0.5),
                Point::new(0.2, 0.0),
                Point::new(0.4, 1.0),
                Point::new(0.5, 0.6),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_maximum() {
        let filter = FrequencyFilter::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        let points = vec![
            Point::new(0.1, 0.5),
            Point::new(0.9, 0.0),
            Point::new(0.9, 1.0),
            Point::new(0.3, 1.0),
        ];
        let out = filter.filter(points);
        assert_eq!(
            out,
            vec![
                Point::new(0.1, 0.5),
                Point::new(0.9, 0.0),
                Point::new(0.9, 1.0),
                Point::new(0.9, 0.0),
            ]
        );
    }

    #[test]
    fn test_trailing_chain_is_kept() {
        let filter = FrequencyFilter::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        let points = vec![
            Point::new(0.1, 0.0),
            Point::new(0.2, 0.0),
            Point::new(1.5, 2.0),
        ];
        let out = filter.filter(points);
        assert_eq!(out.last(), Some(&Point::new(1.5, 2.0)));
        assert_eq!(out.len(), 3);
    }
}
