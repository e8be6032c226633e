//src/model/mod.rs
pub mod elements;
pub mod structure;

// Re-exports for cleaner imports
pub use elements::{ElementProperties, Rgb, FALLBACK_ELEMENT};
pub use structure::{Lattice, Site, Structure};
