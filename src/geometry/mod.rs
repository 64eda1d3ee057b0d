//! Path construction and arc-length queries.

/// Control-point interpolation into a path.
pub mod curve;
/// Arc-length parameterized path geometry.
pub mod path;
