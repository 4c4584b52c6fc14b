// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod core;
pub mod specs;

pub mod emit;
pub mod overrides;
pub mod params;
pub mod progress;
pub mod records;
pub mod runner;
pub mod scrape;
pub mod source;
pub mod types;
