pub mod gesture;
pub mod overlay;
pub mod paths;
pub mod surface;
