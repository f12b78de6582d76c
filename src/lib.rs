pub mod apis;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod types;
