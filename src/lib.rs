//! Rktri Sculpt - height-field terrain sculpting with persistent undo/redo

pub mod core;
pub mod terrain;
pub mod brush;
pub mod history;
pub mod stroke;
pub mod persist;
pub mod session;

pub use brush::{BrushKind, BrushParams};
pub use crate::core::{Error, Result, SculptConfig};
pub use history::{EditHistory, TerrainHistory};
pub use session::SculptSession;
pub use terrain::{HeightGrid, TerrainMesh, TerrainSnapshot};
