// src/gui/mod.rs
pub mod admin;
pub mod app;
pub mod card;
pub mod family;
pub mod progress;

pub use app::run;
