pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod effects;
pub mod logging;
pub mod session;
pub mod shutdown;
pub mod store;
pub mod ui;
