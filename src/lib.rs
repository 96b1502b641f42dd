pub mod cli;
pub mod load_config;
pub mod menu;
pub mod render;

pub use cli::{run, Cli, Commands};
