use crate::document::{BlockData, BlockDimensionData, BlockKey, DocumentHost};
use crate::focus::BlockKeyStore;
use egui::{CursorIcon, Rect, pos2};
use log::{debug, info, warn};
use std::sync::Arc;

/// Smallest width a resize may commit, in points.
pub const MIN_BLOCK_WIDTH: f32 = 20.0;

/// Corner handle identity of a resizable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeCorner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl ResizeCorner {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "tl",
            Self::TopRight => "tr",
            Self::BottomRight => "br",
            Self::BottomLeft => "bl",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Self::TopLeft | Self::BottomRight => CursorIcon::ResizeNwSe,
            Self::TopRight | Self::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// True for the handles on the block's left edge, where dragging the
    /// pointer left grows the block.
    pub fn is_left_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// The corresponding corner of `rect`.
    pub fn of(&self, rect: Rect) -> egui::Pos2 {
        match self {
            Self::TopLeft => rect.left_top(),
            Self::TopRight => rect.right_top(),
            Self::BottomRight => rect.right_bottom(),
            Self::BottomLeft => rect.left_bottom(),
        }
    }
}

/// Distances to pull each edge of a container inward. Negative values push
/// the edge outward, growing the box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    /// `rect` inset by `self`.
    pub fn shrink(&self, rect: Rect) -> Rect {
        Rect::from_min_max(
            pos2(rect.min.x + self.left, rect.min.y + self.top),
            pos2(rect.max.x - self.right, rect.max.y - self.bottom),
        )
    }
}

/// One in-flight resize drag. Exists only between drag-start and drag-end.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    block: BlockKey,
    corner: ResizeCorner,
    start_x: f32,
    /// Container width/height at drag-start, fixed for the whole drag.
    ratio: f32,
    /// Latest pointer x; `None` until the first move arrives.
    current_x: Option<f32>,
}

impl ResizeSession {
    pub fn block(&self) -> &BlockKey {
        &self.block
    }

    pub fn corner(&self) -> ResizeCorner {
        self.corner
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Signed width change so far: positive grows the block. For left-edge
    /// handles dragging the pointer left grows, for right-edge handles
    /// dragging right grows.
    pub fn horizontal_delta(&self) -> f32 {
        let Some(current_x) = self.current_x else {
            return 0.0;
        };
        if self.corner.is_left_edge() {
            self.start_x - current_x
        } else {
            current_x - self.start_x
        }
    }

    /// The live inset rectangle's edge offsets. Only the two edges meeting at
    /// the active corner move; the vertical offset is always the horizontal
    /// one divided by the aspect ratio, so proportions hold in every drag
    /// direction.
    pub fn insets(&self) -> EdgeInsets {
        self.insets_for_delta(self.horizontal_delta())
    }

    fn insets_for_delta(&self, delta: f32) -> EdgeInsets {
        let horizontal = -delta;
        let vertical = -delta / self.ratio;
        let mut insets = EdgeInsets::default();
        match self.corner {
            ResizeCorner::TopLeft => {
                insets.top = vertical;
                insets.left = horizontal;
            }
            ResizeCorner::TopRight => {
                insets.top = vertical;
                insets.right = horizontal;
            }
            ResizeCorner::BottomRight => {
                insets.bottom = vertical;
                insets.right = horizontal;
            }
            ResizeCorner::BottomLeft => {
                insets.bottom = vertical;
                insets.left = horizontal;
            }
        }
        insets
    }
}

#[derive(Debug, Default)]
enum ResizeState {
    #[default]
    Idle,
    Dragging(ResizeSession),
}

/// Pointer-drag state machine for block resizing: `Idle → Dragging → Idle`.
///
/// The engine owns at most one session at a time. Every pointer-path entry
/// checks the block registry first, so a block unmounted mid-drag silently
/// abandons the session: geometry queries return `None`, nothing commits.
/// While `Dragging`, the caller feeds pointer positions observed on the
/// global pointer surface (the pointer leaves the handle's small hit-area
/// immediately) and must call [`finish`](Self::finish) or
/// [`cancel`](Self::cancel) exactly once per session end or teardown.
pub struct ResizeInteraction {
    state: ResizeState,
    registry: Arc<BlockKeyStore>,
    min_width: f32,
}

impl ResizeInteraction {
    pub fn new(registry: Arc<BlockKeyStore>) -> Self {
        Self {
            state: ResizeState::Idle,
            registry,
            min_width: MIN_BLOCK_WIDTH,
        }
    }

    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging(_))
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        match &self.state {
            ResizeState::Dragging(session) => Some(session),
            ResizeState::Idle => None,
        }
    }

    /// Pointer-down over a handle: open a session capturing the start x, the
    /// active corner, and the container's current aspect ratio.
    ///
    /// No-op when the block is not mounted, the container is degenerate, or a
    /// session is already active (at most one session per block).
    pub fn begin(&mut self, block: BlockKey, corner: ResizeCorner, start_x: f32, container: Rect) {
        if self.is_dragging() {
            return;
        }
        if !self.registry.has(&block) {
            debug!("resize begin ignored: block {block} not mounted");
            return;
        }
        if !(container.height() > 0.0 && container.width() > 0.0) {
            debug!("resize begin ignored: degenerate container for {block}");
            return;
        }

        let ratio = container.width() / container.height();
        debug!("resize begin: block {block}, corner {}, ratio {ratio}", corner.as_str());
        self.state = ResizeState::Dragging(ResizeSession {
            block,
            corner,
            start_x,
            ratio,
            current_x: None,
        });
    }

    /// Pointer-move on the global surface. Abandons the session when the
    /// block unmounted mid-drag.
    pub fn update(&mut self, current_x: f32) {
        let block = match &self.state {
            ResizeState::Dragging(session) => session.block.clone(),
            ResizeState::Idle => return,
        };
        if !self.registry.has(&block) {
            debug!("resize abandoned: block {block} unmounted mid-drag");
            self.state = ResizeState::Idle;
            return;
        }
        if let ResizeState::Dragging(session) = &mut self.state {
            session.current_x = Some(current_x);
        }
    }

    /// The live resize box for the block's current `container` rectangle,
    /// clamped to the minimum width. `None` while idle or once the block is
    /// gone.
    pub fn preview_rect(&self, container: Rect) -> Option<Rect> {
        let session = self.session()?;
        if !self.registry.has(&session.block) {
            return None;
        }
        let delta = session
            .horizontal_delta()
            .max(self.min_width - container.width());
        Some(session.insets_for_delta(delta).shrink(container))
    }

    /// Pointer-up: read the final width off the live resize box and commit it
    /// as the block's persisted width through the host.
    ///
    /// The committed value is computed from the tracked drag delta, clamped
    /// to the minimum width. Returns the committed width, or `None` when the
    /// session was abandoned or the host rejected the patch.
    pub fn finish(&mut self, container: Rect, host: &mut dyn DocumentHost) -> Option<f32> {
        let preview = self.preview_rect(container);
        let ResizeState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let Some(preview) = preview else {
            debug!("resize finish: session for {} abandoned", session.block);
            return None;
        };

        let width = preview.width();
        let mut patch = BlockData::new();
        BlockDimensionData::new(width).write_to(&mut patch);
        match host.update_block_data(&session.block, patch) {
            Ok(()) => {
                info!("resize commit: block {} width {width}", session.block);
                Some(width)
            }
            Err(err) => {
                warn!("resize commit failed for {}: {err}", session.block);
                None
            }
        }
    }

    /// Drop the session without committing (teardown path).
    pub fn cancel(&mut self) {
        if let ResizeState::Dragging(session) = std::mem::take(&mut self.state) {
            debug!("resize cancelled: block {}", session.block);
        }
    }
}

impl std::fmt::Debug for ResizeInteraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeInteraction")
            .field("state", &self.state)
            .field("min_width", &self.min_width)
            .finish_non_exhaustive()
    }
}
