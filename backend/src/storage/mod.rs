//! Storage layer: trait boundary plus the in-memory implementation.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::*;
