pub mod chart;
pub mod log;
pub mod palette;
