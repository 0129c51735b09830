pub mod analytics;
pub mod api;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod seed;
pub mod storage;
pub mod telemetry;
