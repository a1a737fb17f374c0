// List the different tasks here
pub mod chart;
pub mod color;
pub mod config;
pub mod measurements;
pub mod menu;
pub mod report;
pub mod schema;
pub mod speedup;
