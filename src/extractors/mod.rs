// src/extractors/mod.rs
pub mod coords;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use coords::{CoordinateExtractor, CoordinateRecord, ExtractionStrategy};
