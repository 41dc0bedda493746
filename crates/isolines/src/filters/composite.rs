use super::{CountFilter, InclinationFilter, PointFilter};
use crate::config::IsolineConfig;
use crate::geometry::{Point, Rect};

/// Runs a sequence of filters, feeding each one the previous output.
#[derive(Debug, Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn PointFilter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Box<dyn PointFilter>>) -> Self {
        Self { filters }
    }

    /// Inclination pass followed by a count cap, tuned from `config`.
    pub fn from_config(config: &IsolineConfig) -> Self {
        Self::new(vec![
            Box::new(InclinationFilter::new(config.critical_angle)),
            Box::new(CountFilter::new(config.max_points)),
        ])
    }

    pub fn push(&mut self, filter: impl PointFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn with(mut self, filter: impl PointFilter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl PointFilter for CompositeFilter {
    fn set_visible_rect(&mut self, visible: Rect) {
        for filter in &mut self.filters {
            filter.set_visible_rect(visible);
        }
    }

    fn filter(&self, points: Vec<Point>) -> Vec<Point> {
        self.filters
            .iter()
            .fold(points, |points, filter| filter.filter(points))
    }
}
