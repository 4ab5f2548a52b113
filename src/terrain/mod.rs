//! Height-field terrain: the sample grid, its triangulation, snapshots of
//! its elevations and the mesh view handed to the renderer.

pub mod grid;
pub mod mesh;
pub mod snapshot;
pub mod triangulation;

pub use grid::HeightGrid;
pub use mesh::{TerrainMesh, TerrainVertex};
pub use snapshot::TerrainSnapshot;
pub use triangulation::triangulate;
