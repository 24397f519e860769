//! Boss AI systems (ECS ↔ controller glue)

pub mod tick;

// Re-export all systems
pub use tick::*;
