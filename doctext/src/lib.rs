pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod report;
