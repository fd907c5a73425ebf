pub mod args;
pub mod config;
pub mod core;
pub mod errors;
pub mod render;
pub mod runner;
