//! AI components

pub mod boss;
pub mod config;
pub mod state;


// Re-export all components
pub use boss::*;
pub use config::*;
pub use state::*;
