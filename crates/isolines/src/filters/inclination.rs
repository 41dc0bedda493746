use super::PointFilter;
use crate::geometry::Point;

/// Default critical angle in degrees.
pub const DEFAULT_CRITICAL_ANGLE: f64 = 178.0;

/// Drops points where the line is almost straight.
///
/// Starting from the last kept point, the filter scans ahead for the first
/// point where the line turns by more than `180° - critical_angle`; that point
/// is kept and the scan restarts from it. The last input point is always kept.
#[derive(Debug, Clone, PartialEq)]
pub struct InclinationFilter {
    /// Angle at a vertex (180° means straight) below which the vertex is kept.
    pub critical_angle: f64,
}

impl Default for InclinationFilter {
    fn default() -> Self {
        Self {
            critical_angle: DEFAULT_CRITICAL_ANGLE,
        }
    }
}

impl InclinationFilter {
    pub fn new(critical_angle: f64) -> Self {
        Self { critical_angle }
    }
}

/// Angle at `b` in the triangle `a`, `b`, `c`, in degrees.
fn vertex_angle(a: Point, b: Point, c: Point) -> f64 {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ac = a.distance(c);
    let cos = ((ab * ab + bc * bc - ac * ac) / (2.0 * ab * bc)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

impl PointFilter for InclinationFilter {
    fn filter(&self, points: Vec<Point>) -> Vec<Point> {
        let Some(&first) = points.first() else {
            return points;
        };

        let mut kept = vec![first];
        let mut i = 1;
        while i < points.len() {
            let mut accepted = false;
            let mut j = i;
            while !accepted && j + 1 < points.len() {
                let anchor = kept[kept.len() - 1];
                // Zero-length sides give NaN, which never compares below the threshold
                if vertex_angle(anchor, points[j], points[j + 1]) < self.critical_angle {
                    kept.push(points[j]);
                    accepted = true;
                    i = j + 1;
                } else {
                    j += 1;
                }
            }

            if !accepted {
                kept.push(points[points.len() - 1]);
                break;
            }
        }
        kept
    }
}
