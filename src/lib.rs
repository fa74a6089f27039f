//! Workout-log analysis service: parses uploaded CSV/XLSX logs, derives body
//! and strength metrics, renders progress charts and asks a remote chat model
//! for coaching commentary.

pub mod coach;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod types;
