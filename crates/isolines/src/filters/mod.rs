//! Point filters that thin out polylines before they are drawn.
//!
//! Every filter takes ownership of the input points and returns the kept
//! ones, so a filter that has nothing to do hands the vector back untouched.

mod composite;
mod count;
mod frequency;
mod inclination;

pub use composite::CompositeFilter;
pub use count::CountFilter;
pub use frequency::FrequencyFilter;
pub use inclination::InclinationFilter;

use crate::geometry::{Point, Rect};

/// A polyline simplification step.
pub trait PointFilter: std::fmt::Debug {
    /// Filter a list of points, keeping their order.
    fn filter(&self, points: Vec<Point>) -> Vec<Point>;

    /// Set the visible window. Call once before the first `filter`.
    ///
    /// Filters that do not depend on the view ignore it.
    fn set_visible_rect(&mut self, _visible: Rect) {}
}
