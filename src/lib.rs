pub mod catalog;
pub mod models;
pub mod pricing;
pub mod tui;
