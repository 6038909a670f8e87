// src/core/mod.rs

pub mod csv;
pub mod net;
pub mod sanitize;

/// Error type that can cross worker threads.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
