//! Sculpting session: the single owner of the grid, the brush parameters
//! and the edit history.
//!
//! Input, UI and rendering code talk to the core only through this type.
//! Everything runs on the caller's thread; operations that replace state
//! wholesale (undo, redo, reset, load) are refused while a stroke is open.

use std::path::PathBuf;

use glam::Vec2;

use crate::brush::{BrushKind, BrushParams};
use crate::core::config::SculptConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::history::TerrainHistory;
use crate::persist;
use crate::stroke::StrokeAtomizer;
use crate::terrain::{HeightGrid, TerrainMesh};

/// Owns all editable state of one terrain.
#[derive(Debug)]
pub struct SculptSession {
    config: SculptConfig,
    grid: HeightGrid,
    params: BrushParams,
    history: TerrainHistory,
    stroke: StrokeAtomizer,
    selected: Option<BrushKind>,
}

impl SculptSession {
    /// Create a session with a flat grid recorded as the first history state.
    pub fn new(config: SculptConfig) -> Result<Self> {
        config.validate()?;

        let grid = HeightGrid::from_config(&config.grid);
        let mut history = TerrainHistory::new();
        history.add(grid.snapshot());

        log::debug!(
            "Session created: {}x{} grid, elevation [{}, {}]",
            grid.width(),
            grid.height(),
            grid.min_elevation(),
            grid.max_elevation()
        );

        Ok(Self {
            params: BrushParams::new(&config.brush),
            config,
            grid,
            history,
            stroke: StrokeAtomizer::new(),
            selected: None,
        })
    }

    pub fn config(&self) -> &SculptConfig {
        &self.config
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    pub fn history(&self) -> &TerrainHistory {
        &self.history
    }

    pub fn params(&self) -> &BrushParams {
        &self.params
    }

    // -- Strokes ----------------------------------------------------------

    /// Start a stroke; called once when the input is pressed.
    pub fn begin_action(&mut self) {
        self.stroke.begin();
    }

    /// Whether a stroke is currently open.
    pub fn is_action_in_progress(&self) -> bool {
        self.stroke.is_active()
    }

    /// Apply one frame of `kind` at the cursor. Opens a stroke if none is
    /// open. Returns the number of samples inside the brush disc.
    pub fn draw(&mut self, kind: BrushKind, target: f32, dt: f32) -> Result<usize> {
        if !self.stroke.is_active() {
            log::debug!("draw outside a stroke, beginning one");
            self.stroke.begin();
        }
        let touched = kind.draw(&mut self.grid, &self.params, target, dt)?;
        self.stroke.record_frame();
        Ok(touched)
    }

    /// Apply the selected brush, if any.
    pub fn draw_selected(&mut self, target: f32, dt: f32) -> Result<usize> {
        match self.selected {
            Some(kind) => self.draw(kind, target, dt),
            None => Ok(0),
        }
    }

    /// Close the stroke; commits one history state if the grid changed.
    pub fn end_action(&mut self) -> bool {
        self.stroke.end(&mut self.grid, &mut self.history)
    }

    pub fn select_brush(&mut self, kind: Option<BrushKind>) {
        self.selected = kind;
    }

    pub fn selected_brush(&self) -> Option<BrushKind> {
        self.selected
    }

    // -- History ----------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_go_to_prev()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_go_to_next()
    }

    /// Step back one state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.ensure_idle("undo")?;
        if !self.history.can_go_to_prev() {
            log::debug!("Nothing to undo");
            return Ok(false);
        }

        let snapshot = self.history.enter_prev()?.clone();
        self.grid.load_snapshot(&snapshot)?;
        log::debug!("Undo to state {}", self.history);
        Ok(true)
    }

    /// Step forward one state. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        self.ensure_idle("redo")?;
        if !self.history.can_go_to_next() {
            log::debug!("Nothing to redo");
            return Ok(false);
        }

        let snapshot = self.history.enter_next()?.clone();
        self.grid.load_snapshot(&snapshot)?;
        log::debug!("Redo to state {}", self.history);
        Ok(true)
    }

    /// Flatten the terrain and record the flat state as a new history entry.
    pub fn generate_default(&mut self) -> Result<()> {
        self.ensure_idle("reset")?;
        self.grid.generate_default();
        self.history.add(self.grid.snapshot());
        self.grid.clear_dirty();
        log::info!("Terrain reset to flat, history now {}", self.history.len());
        Ok(())
    }

    fn ensure_idle(&self, operation: &str) -> Result<()> {
        if self.stroke.is_active() {
            log::warn!("Refusing {} while a stroke is in progress", operation);
            return Err(Error::ActionInProgress);
        }
        Ok(())
    }

    // -- Rendering --------------------------------------------------------

    /// Current elevations, row-major.
    pub fn elevations(&self) -> &[f32] {
        self.grid.samples()
    }

    /// Triangle indices for the current grid.
    pub fn triangles(&self) -> &[u32] {
        self.grid.triangles()
    }

    /// Mesh for upload after any mutating call.
    pub fn mesh(&self) -> TerrainMesh {
        TerrainMesh::from_grid(&self.grid)
    }

    /// Cursor position, size and weight for drawing the brush ring.
    pub fn cursor(&self) -> (Vec2, f32, f32) {
        (self.params.position(), self.params.size(), self.params.weight())
    }

    // -- Brush parameters -------------------------------------------------

    pub fn set_cursor_size(&mut self, value: f32) {
        self.params.set_size(value);
    }

    pub fn set_cursor_weight(&mut self, value: f32) {
        self.params.set_weight(value);
    }

    pub fn change_size(&mut self, delta: f32) {
        self.params.change_size(delta);
    }

    pub fn change_weight(&mut self, delta: f32) {
        self.params.change_weight(delta);
    }

    pub fn set_cursor_position(&mut self, position: Vec2) {
        self.params.set_position(position);
    }

    // -- Persistence ------------------------------------------------------

    /// Save the whole history under the storage directory.
    pub fn save_to_file(&self, name: &str) -> Result<PathBuf> {
        self.ensure_idle("save")?;
        let path = persist::history_path(&self.config.storage, name)?;
        persist::save_history(&path, &self.history)?;
        Ok(path)
    }

    /// Replace the history and grid with the contents of a saved file.
    ///
    /// The grid takes the file's dimensions and keeps the configured elevation
    /// limits. A file holding any state outside those limits is refused with
    /// [`Error::SnapshotMismatch`], so every history state stays reachable
    /// unclamped. On any error, including a missing file, the session is
    /// unchanged.
    pub fn load_from_file(&mut self, name: &str) -> Result<PathBuf> {
        self.ensure_idle("load")?;
        let path = persist::history_path(&self.config.storage, name)?;

        let history = match persist::load_history(&path) {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                return Err(e);
            }
        };

        let (min, max) = (self.grid.min_elevation(), self.grid.max_elevation());
        for (i, snapshot) in history.iter().enumerate() {
            let (lo, hi) = snapshot.elevation_range();
            if lo < min || hi > max {
                log::warn!(
                    "Refusing {}: state {} spans [{}, {}], limits are [{}, {}]",
                    path.display(),
                    i,
                    lo,
                    hi,
                    min,
                    max
                );
                return Err(Error::SnapshotMismatch(format!(
                    "state {} spans [{}, {}], outside the elevation limits [{}, {}]",
                    i, lo, hi, min, max
                )));
            }
        }

        let current = history.current().ok_or(Error::EmptyHistory)?;
        let mut grid = HeightGrid::new(current.width(), current.height(), min, max);
        grid.load_snapshot(current)?;

        self.grid = grid;
        self.history = history;
        Ok(path)
    }
}
