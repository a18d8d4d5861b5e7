// src/lib.rs

#[macro_use]
pub mod macros;

pub mod chart;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod notify;
pub mod progress;
pub mod record;
pub mod runner;
pub mod specs;
pub mod store;
