mod floating_toolbar;
mod resize_handle;

pub use floating_toolbar::show_floating_toolbar;
pub use resize_handle::{ResizeHandle, show_resize_overlay};
