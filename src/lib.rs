pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod rank;
pub mod report;
pub mod system;
