pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod menu_screen;
pub mod native;
pub mod plain;
pub mod status;
pub mod ui;
