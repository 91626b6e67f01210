pub mod host;
pub mod ppm;
pub mod project;
