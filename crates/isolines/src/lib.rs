//! Isoline (contour line) extraction and annotation for 2D scalar fields.
//!
//! This crate traces lines of constant value through a scalar field sampled
//! on a warped 2D grid, simplifies them for display and places text labels
//! along them. It enables:
//!
//! - **Cell tracking**: each line is followed cell to cell, so lines come out
//!   as ordered polylines with no stitching pass
//! - **Saddle resolution**: ambiguous cells are subdivided until the path is
//!   unambiguous
//! - **Point filtering**: composable polyline simplification steps
//!
//! # Pipeline
//!
//! ```text
//! ScalarField2D
//!      │
//!      ▼
//! IsolineBuilder::build()
//!      │
//!      ├─► Generate levels across [min, max]
//!      │
//!      └─► Per level: scan boundary and interior edges, trace each line
//!               │
//!               ▼
//!          IsolineCollection
//!               │
//!               ├─► PointFilter (thin out points)
//!               │
//!               └─► IsolineTextAnnotater (label placements)
//! ```
//!
//! # Example
//!
//! ```
//! use isolines::{IsolineBuilder, IsolineTextAnnotater, Point, ScalarField2D};
//!
//! let field = ScalarField2D::from_fn(
//!     11,
//!     11,
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     |p| p.x,
//! )?;
//!
//! let mut builder = IsolineBuilder::with_field(field);
//! let collection = builder.build_level(4.5)?;
//! assert_eq!(collection.len(), 1);
//!
//! let labels = IsolineTextAnnotater::new(3.0)
//!     .annotate(&collection, isolines::Rect::new(0.0, 0.0, 10.0, 10.0));
//! assert!(!labels.is_empty());
//! # Ok::<(), isolines::IsolineError>(())
//! ```

pub mod annotate;
pub mod builder;
pub mod cell;
pub mod collection;
pub mod config;
pub mod error;
pub mod field;
pub mod filters;
pub mod geometry;
pub mod saddle;

// Re-export commonly used types at crate root
pub use annotate::{format_significant, IsolineTextAnnotater, IsolineTextLabel};
pub use builder::{generate_levels, IsolineBuilder};
pub use collection::{IsolineCollection, LevelLine};
pub use config::IsolineConfig;
pub use error::{IsolineError, Result};
pub use field::ScalarField2D;
pub use filters::{
    CompositeFilter, CountFilter, FrequencyFilter, InclinationFilter, PointFilter,
};
pub use geometry::{Point, Rect, Segment};
