use egui::{Rect, Vec2};

/// Default gap between the selection rectangle and the toolbar, in points.
pub const DEFAULT_GAP: f32 = 8.0;

/// Computed toolbar placement, in the same coordinate space as the inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarPosition {
    pub top: f32,
    pub left: f32,
    /// True when the toolbar was flipped below the selection for lack of room
    /// above; styling uses this to mirror the arrow.
    pub reverse: bool,
}

/// Place the toolbar relative to the current selection.
///
/// All rectangles share one coordinate space. Preferred placement is above
/// the selection, `gap` points away; when that would leave the editor root,
/// placement flips below and `reverse` is set. Horizontally the toolbar
/// centers on the selection midpoint, clamped to the root (the left edge wins
/// when the toolbar is wider than the root).
///
/// Returns `None` for a degenerate selection with no visual extent; callers
/// must not show the toolbar in that case.
pub fn toolbar_position(
    root: Rect,
    toolbar_size: Vec2,
    selection: Option<Rect>,
    gap: f32,
) -> Option<ToolbarPosition> {
    let selection = selection?;
    if !selection.is_finite() {
        return None;
    }

    let mut top = selection.top() - toolbar_size.y - gap;
    let mut reverse = false;
    if top < root.top() {
        top = selection.bottom() + gap;
        reverse = true;
    }

    let left = (selection.center().x - toolbar_size.x / 2.0)
        .min(root.right() - toolbar_size.x)
        .max(root.left());

    Some(ToolbarPosition { top, left, reverse })
}
