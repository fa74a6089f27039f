pub mod ask;
pub mod chart;
pub mod health;
pub mod upload;
