// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod roster;

pub mod cli;
pub mod export;
pub mod gui;
pub mod progress;
pub mod source;
pub mod store;
