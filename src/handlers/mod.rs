pub mod common;
pub mod menu;
pub mod orders;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
