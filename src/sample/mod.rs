/// Equal arc-length sampling of a path.
pub mod sampler;
