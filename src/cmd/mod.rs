pub mod config;
pub mod dashboard;
pub mod menu;
pub mod prompt;
pub mod render;
pub mod shell;
