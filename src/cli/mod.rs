pub mod app;
pub mod commands;
pub mod env;
pub mod options;
pub mod output;
pub mod report;
