//! Shared state helpers used across screens

pub mod countdown;
pub mod messages;
pub mod navigation;

pub use countdown::Countdown;
pub use messages::MessageDisplay;
pub use navigation::{ListCursor, Navigable};
