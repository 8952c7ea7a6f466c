pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod notify;
pub mod remote;
pub mod tui;

mod tui_shell;
