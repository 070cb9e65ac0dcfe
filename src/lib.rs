pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod scene;
pub mod types;

pub use display::Display;
