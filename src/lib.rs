pub mod config;
pub mod controller;
pub mod director;
pub mod dom;
pub mod error;
pub mod motion;
pub mod progress;
pub mod scheduler;
pub mod scroll;
pub mod telemetry;
pub mod theme;

#[cfg(test)]
mod fake;
