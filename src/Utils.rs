//! different utility modules used throughout the project
/// run settings read from a TOML file
pub mod config;
/// simplelog set-up: terminal plus optional log file
pub mod logger;
/// cutoff factor plots (PNG and csv)
pub mod plots;
