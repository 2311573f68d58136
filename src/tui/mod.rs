pub mod app;
pub mod backend;
pub mod routes;
pub mod screen_trait;
pub mod screens;
pub mod state;
pub mod state_machine;
pub mod validation;
pub mod widgets;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use app::App;
