pub mod chart;
pub mod metrics;
pub mod parse;
pub mod rasterize;
pub mod render;
