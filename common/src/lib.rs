// Common library for the data request worker

pub mod config;
pub mod credential;
pub mod encoding;
pub mod errors;
pub mod executor;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod telemetry;
