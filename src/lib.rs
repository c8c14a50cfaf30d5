// Library exports for testing
pub mod app;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyboard;
pub mod layout;
pub mod repeat;
pub mod types;
pub mod ui;
