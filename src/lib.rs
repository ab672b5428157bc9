#![warn(clippy::all, rust_2018_idioms)]

//! Cross-plugin coordination layer for an extensible rich-text editor:
//! a reactive shared-state store, focus tracking for embedded blocks,
//! selection-driven floating-toolbar placement and motion, and pointer-drag
//! resize geometry for embedded media.

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod focus;
pub mod resize;
pub mod selection;
pub mod store;
pub mod toolbar;
pub mod util;
pub mod widgets;

pub use app::EditorApp;
pub use config::EditorConfig;
pub use document::{BlockData, BlockDimensionData, BlockKey, DocumentHost};
pub use error::{EditorError, EditorResult};
pub use focus::{BlockKeyStore, FocusGuard};
pub use resize::{EdgeInsets, ResizeCorner, ResizeInteraction, ResizeSession};
pub use selection::{SELECTION_KEY, SelectionMonitor, SelectionSnapshot, toolbar_visible};
pub use store::{PluginStore, StoreSubscriber, StoreValue};
pub use toolbar::{ToolbarMotion, ToolbarPhase, ToolbarPosition, toolbar_position};
pub use util::time::{Clock, ManualClock, MonotonicClock};
