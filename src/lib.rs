pub mod commands;
pub mod config;
pub mod fs;
pub mod models;
pub mod runtime;
