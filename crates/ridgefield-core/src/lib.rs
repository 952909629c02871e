//! Core grid types for ridge detection on latitude/longitude fields.
//!
//! This crate holds the data model only: named coordinate axes, the
//! row-major `LatLonGrid`, its JSON record form, and the open-interval
//! bounding-box crop used to pre-select a region before detection. It does
//! not differentiate anything.

mod axis;
mod bbox;
mod error;
mod grid;
mod logger;
mod record;

pub use axis::{AxisOrder, CoordAxis, LATITUDE, LONGITUDE};
pub use bbox::{crop_to_bounds, crop_to_bounds_named, AxisBounds};
pub use error::GridError;
pub use grid::LatLonGrid;
pub use record::GridRecord;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_filter, init_with_level, level_from_verbosity};

/// Mean Earth radius in metres used for physical grid spacing.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
