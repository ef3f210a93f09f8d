pub mod completions;
pub mod config;
pub mod start;
pub mod technique;
