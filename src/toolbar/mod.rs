mod motion;
mod position;

pub use motion::{DEFAULT_MOTION_DEADLINE, ToolbarMotion, ToolbarPhase};
pub use position::{DEFAULT_GAP, ToolbarPosition, toolbar_position};

use crate::store::PluginStore;
use std::sync::Arc;

/// Store key under which one plugin may temporarily replace the toolbar's
/// children (e.g. a link-editing form taking over the formatting buttons).
pub const OVERRIDE_CONTENT_KEY: &str = "toolbar_override_content";

/// Replacement toolbar content: a draw closure the toolbar widget runs
/// instead of its default children while the override is set.
pub type ToolbarContent = Arc<dyn Fn(&mut egui::Ui) + Send + Sync>;

/// Install `content` as the toolbar's override content.
pub fn set_override_content(store: &PluginStore, content: ToolbarContent) {
    store.set(OVERRIDE_CONTENT_KEY, Arc::new(Some(content)));
}

/// Restore the toolbar's default children.
pub fn clear_override_content(store: &PluginStore) {
    store.set(OVERRIDE_CONTENT_KEY, Arc::new(None::<ToolbarContent>));
}

/// The override content currently in effect, if any.
pub fn override_content(store: &PluginStore) -> Option<ToolbarContent> {
    store
        .get_as::<Option<ToolbarContent>>(OVERRIDE_CONTENT_KEY)
        .and_then(|v| v.as_ref().clone())
}
