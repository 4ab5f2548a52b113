//! Undo/redo history of terrain states.

pub mod list;

pub use list::{EditHistory, HistoryNode, Iter, NodeId};

use crate::terrain::TerrainSnapshot;

/// History of whole-grid snapshots, as kept by a sculpting session.
pub type TerrainHistory = EditHistory<TerrainSnapshot>;
