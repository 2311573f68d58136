pub mod config;
pub mod money;
pub mod receipt;
pub mod theme;

// Re-export commonly used types at models root for convenience
pub use config::AppConfig;
pub use receipt::Receipt;
pub use theme::{Palette, Theme};
