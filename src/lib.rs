pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod exec;
pub mod logging;
pub mod session;
pub mod ui;
