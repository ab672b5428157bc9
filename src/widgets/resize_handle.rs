use crate::document::{BlockKey, DocumentHost};
use crate::resize::{ResizeCorner, ResizeInteraction};
use egui::{Color32, Id, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

/// A corner drag affordance for one resizable block.
pub struct ResizeHandle {
    block: BlockKey,
    corner: ResizeCorner,
    position: Pos2,
    size: f32,
}

impl ResizeHandle {
    pub fn new(block: BlockKey, corner: ResizeCorner, position: Pos2, size: f32) -> Self {
        Self {
            block,
            corner,
            position,
            size,
        }
    }

    /// Paint the handle and return its interaction response.
    pub fn show(&self, ui: &mut Ui) -> Response {
        let id = Id::new(("resize_handle", self.block.as_str(), self.corner.as_str()));
        let rect = Rect::from_center_size(self.position, Vec2::splat(self.size));

        ui.painter()
            .rect_filled(rect, 2.0, ui.visuals().selection.bg_fill);
        ui.painter()
            .rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::WHITE));

        ui.interact(rect, id, Sense::click_and_drag())
            .on_hover_cursor(self.corner.cursor_icon())
    }

    pub fn corner(&self) -> ResizeCorner {
        self.corner
    }
}

/// Paint the live resize box and the four corner handles for `block`, and
/// drive `interaction` from pointer input.
///
/// Handle hits open the session; move and release are read off the global
/// pointer surface (`ctx.input`), not the handle's own response, because the
/// pointer leaves the handle's small hit-area as soon as the drag starts. The
/// session ends here on release, or in the engine's teardown path.
///
/// Returns the committed width when this frame ended a drag.
pub fn show_resize_overlay(
    ui: &mut Ui,
    interaction: &mut ResizeInteraction,
    host: &mut dyn DocumentHost,
    block: &BlockKey,
    container: Rect,
    handle_size: f32,
) -> Option<f32> {
    let preview = interaction.preview_rect(container).unwrap_or(container);

    // Live box with its size readout, mirroring the block's proportions.
    ui.painter()
        .rect_stroke(preview, 0.0, ui.visuals().widgets.active.fg_stroke);
    if interaction.is_dragging() {
        ui.painter().text(
            preview.center_bottom() + Vec2::new(0.0, 12.0),
            egui::Align2::CENTER_CENTER,
            format!("{:.0} x {:.0}", preview.width(), preview.height()),
            egui::FontId::proportional(11.0),
            ui.visuals().weak_text_color(),
        );
    }

    for corner in ResizeCorner::ALL {
        let handle = ResizeHandle::new(block.clone(), corner, corner.of(preview), handle_size);
        let response = handle.show(ui);
        if response.drag_started() {
            if let Some(pointer) = response.interact_pointer_pos() {
                interaction.begin(block.clone(), corner, pointer.x, container);
            }
        }
    }

    if !interaction.is_dragging() {
        return None;
    }

    let (pointer_x, released) = ui.ctx().input(|i| {
        (
            i.pointer.latest_pos().map(|p| p.x),
            i.pointer.primary_released(),
        )
    });
    if let Some(x) = pointer_x {
        interaction.update(x);
    }
    if released {
        return interaction.finish(container, host);
    }
    None
}
