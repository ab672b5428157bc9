use crate::resize::MIN_BLOCK_WIDTH;
use crate::toolbar::{DEFAULT_GAP, DEFAULT_MOTION_DEADLINE};
use std::time::Duration;

/// Toolkit-level tunables, shared by the widgets and interaction engines.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Gap between the selection rectangle and the floating toolbar.
    pub toolbar_gap: f32,
    /// Deadline after which a stuck toolbar transition is force-completed.
    pub motion_deadline: Duration,
    /// Edge length of a corner resize handle.
    pub handle_size: f32,
    /// Smallest width a resize may commit.
    pub min_block_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            toolbar_gap: DEFAULT_GAP,
            motion_deadline: DEFAULT_MOTION_DEADLINE,
            handle_size: 8.0,
            min_block_width: MIN_BLOCK_WIDTH,
        }
    }
}
