//! Terrain brushes
//!
//! A brush reads the shared cursor parameters and mutates the height grid
//! inside the cursor disc. The set of brushes is closed; [`BRUSHES`] lists
//! them with their display metadata.

pub mod bounds;
pub mod draw;
pub mod kind;
pub mod params;

// Re-exports
pub use bounds::CursorBounds;
pub use draw::falloff;
pub use kind::{BrushInfo, BrushKind, UnknownBrush, BRUSHES};
pub use params::BrushParams;
