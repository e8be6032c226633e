pub mod framing;
pub mod scene;
pub mod unit_cell;

// Re-export specific items to keep the API clean for the rest of the crate
pub use framing::{FramingCalculator, FramingResult};
pub use scene::{calculate_scene, RenderModel};
pub use unit_cell::UnitCellOutline;
