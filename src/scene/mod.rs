/// JSON scene description.
pub mod model;
