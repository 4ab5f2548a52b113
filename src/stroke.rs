//! Stroke atomization.
//!
//! A held input applies a brush every frame. All of those applications are
//! collapsed into at most one history entry, committed when the input is
//! released and only if some sample actually changed.

use crate::history::TerrainHistory;
use crate::terrain::HeightGrid;

/// Tracks whether a stroke is in progress.
#[derive(Debug, Clone, Default)]
pub struct StrokeAtomizer {
    active: bool,
    /// Brush applications since `begin`
    frames: u32,
}

impl StrokeAtomizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke has begun and not yet ended.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames drawn in the current stroke.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Start a stroke. Calling this during a stroke is ignored.
    pub fn begin(&mut self) {
        if self.active {
            log::debug!("begin_action during an active stroke ignored");
            return;
        }
        self.active = true;
        self.frames = 0;
    }

    /// Count one brush application.
    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Finish the stroke, committing one snapshot if the grid changed.
    ///
    /// Always clears the active state and the grid's dirty flag. Returns
    /// whether a snapshot was added.
    pub fn end(&mut self, grid: &mut HeightGrid, history: &mut TerrainHistory) -> bool {
        let committed = grid.is_dirty();
        if committed {
            history.add(grid.snapshot());
            log::debug!(
                "Stroke committed after {} frames, history now {}",
                self.frames,
                history.len()
            );
        } else if self.active {
            log::debug!("Stroke of {} frames left the grid unchanged", self.frames);
        }

        self.active = false;
        self.frames = 0;
        grid.clear_dirty();
        committed
    }
}
