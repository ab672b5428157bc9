use crate::store::PluginStore;
use crate::toolbar::{ToolbarMotion, override_content};
use egui::{Area, Context, Frame, Id, Order, Ui, pos2};

/// Render the floating toolbar at the placement prepared by `motion`.
///
/// The toolbar stays in the scene through all non-hidden phases; its opacity
/// animates with the phase and the animation's endpoints supply the
/// completion signal to the state machine. The deadline guard is polled here
/// too, so the machine cannot stay stuck on a missed signal.
///
/// `contents` draws the default children; a store override installed via
/// [`crate::toolbar::set_override_content`] takes their place while set.
pub fn show_floating_toolbar(
    ctx: &Context,
    store: &PluginStore,
    motion: &mut ToolbarMotion,
    contents: impl FnOnce(&mut Ui),
) {
    motion.poll_deadline();

    if !motion.is_shown() {
        // Keep the fade animation anchored at zero while hidden.
        ctx.animate_bool(Id::new("floating_toolbar_fade"), false);
        return;
    }
    let Some(position) = motion.position() else {
        return;
    };

    let opacity = ctx.animate_bool(
        Id::new("floating_toolbar_fade"),
        motion.phase().targets_visible(),
    );
    // Animation endpoints stand in for the animation-end event.
    if motion.phase().is_transitioning()
        && ((motion.phase().targets_visible() && opacity >= 1.0)
            || (!motion.phase().targets_visible() && opacity <= 0.0))
    {
        motion.complete_transition();
    }

    Area::new(Id::new("floating_toolbar"))
        .order(Order::Foreground)
        .fixed_pos(pos2(position.left, position.top))
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| match override_content(store) {
                    Some(content) => content(ui),
                    None => contents(ui),
                });
            });
        });
}
