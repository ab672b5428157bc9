use crate::config::EditorConfig;
use crate::document::{BlockData, BlockDimensionData, BlockKey, DocumentHost};
use crate::error::{EditorError, EditorResult};
use crate::focus::{BlockKeyStore, FocusGuard};
use crate::resize::ResizeInteraction;
use crate::selection::{SELECTION_KEY, SelectionMonitor, SelectionSnapshot, toolbar_visible};
use crate::store::{PluginStore, StoreSubscriber, StoreValue};
use crate::toolbar::{ToolbarMotion, clear_override_content, set_override_content, toolbar_position};
use crate::util::time::MonotonicClock;
use crate::widgets::{show_floating_toolbar, show_resize_overlay};
use egui::{Color32, Pos2, Rect, Sense, Vec2, vec2};
use log::info;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const TOOLBAR_SIZE: Vec2 = vec2(180.0, 32.0);
const DEFAULT_MEDIA_WIDTH: f32 = 240.0;

enum DemoBlockContent {
    Text(String),
    Media { data: BlockData, aspect_ratio: f32 },
}

struct DemoBlock {
    key: BlockKey,
    content: DemoBlockContent,
}

/// Minimal in-memory document standing in for the external text engine.
pub struct DemoDocument {
    blocks: Vec<DemoBlock>,
    selection: SelectionSnapshot,
}

impl DemoDocument {
    fn sample() -> Self {
        Self {
            blocks: vec![
                DemoBlock {
                    key: BlockKey::new("intro"),
                    content: DemoBlockContent::Text(
                        "Drag across this paragraph to select text and raise the toolbar."
                            .to_owned(),
                    ),
                },
                DemoBlock {
                    key: BlockKey::new("media"),
                    content: DemoBlockContent::Media {
                        data: BlockData::new(),
                        aspect_ratio: 16.0 / 9.0,
                    },
                },
                DemoBlock {
                    key: BlockKey::new("outro"),
                    content: DemoBlockContent::Text(
                        "Click the media block above, then drag a corner handle to resize it."
                            .to_owned(),
                    ),
                },
            ],
            selection: SelectionSnapshot::default(),
        }
    }

    fn block(&self, key: &BlockKey) -> Option<&DemoBlock> {
        self.blocks.iter().find(|b| &b.key == key)
    }
}

impl DocumentHost for DemoDocument {
    fn selection(&self) -> SelectionSnapshot {
        self.selection.clone()
    }

    fn block_data(&self, key: &BlockKey) -> Option<BlockData> {
        match &self.block(key)?.content {
            DemoBlockContent::Media { data, .. } => Some(data.clone()),
            DemoBlockContent::Text(_) => None,
        }
    }

    fn update_block_data(&mut self, key: &BlockKey, patch: BlockData) -> EditorResult<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.key == key)
            .ok_or_else(|| EditorError::UnknownBlock(key.clone()))?;
        match &mut block.content {
            DemoBlockContent::Media { data, .. } => {
                data.extend(patch);
                Ok(())
            }
            DemoBlockContent::Text(_) => Err(EditorError::BlockNotResizable(key.clone())),
        }
    }
}

/// Demo editor surface wiring the full pipeline: document changes feed the
/// selection monitor, the monitor publishes into the store, the store
/// subscription flips the toolbar intent, and the motion machine places and
/// fades the toolbar. Pointer input on the media block drives the resize
/// engine.
pub struct EditorApp {
    config: EditorConfig,
    store: Arc<PluginStore>,
    monitor: SelectionMonitor,
    motion: ToolbarMotion,
    resize: ResizeInteraction,
    document: DemoDocument,
    // Holds the media block's registry entry for the surface's lifetime.
    _media_guard: FocusGuard,
    toolbar_intent: Arc<AtomicBool>,
    selection_subscriber: StoreSubscriber,
    selection_rect: Option<Rect>,
    drag_origin: Option<Pos2>,
    media_focused: bool,
}

impl EditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = EditorConfig::default();
        let store = Arc::new(PluginStore::new());
        let registry = Arc::new(BlockKeyStore::new());
        let document = DemoDocument::sample();

        let media_guard = FocusGuard::new(registry.clone(), BlockKey::new("media"));

        let toolbar_intent = Arc::new(AtomicBool::new(false));
        let intent_in_cb = toolbar_intent.clone();
        let selection_subscriber: StoreSubscriber = Arc::new(move |value: &StoreValue| {
            if let Ok(snapshot) = value.clone().downcast::<SelectionSnapshot>() {
                intent_in_cb.store(toolbar_visible(&snapshot), Ordering::SeqCst);
            }
        });
        store.subscribe(SELECTION_KEY, selection_subscriber.clone());

        Self {
            motion: ToolbarMotion::new(Arc::new(MonotonicClock::new()))
                .with_deadline(config.motion_deadline),
            resize: ResizeInteraction::new(registry).with_min_width(config.min_block_width),
            config,
            store,
            monitor: SelectionMonitor::new(),
            document,
            _media_guard: media_guard,
            toolbar_intent,
            selection_subscriber,
            selection_rect: None,
            drag_origin: None,
            media_focused: false,
        }
    }

    fn show_text_block(&mut self, ui: &mut egui::Ui, key: &BlockKey, text: &str) {
        let response = ui.add(egui::Label::new(text).sense(Sense::click_and_drag()));

        if response.drag_started() {
            self.drag_origin = response.interact_pointer_pos();
        }
        if response.dragged() {
            if let (Some(origin), Some(current)) =
                (self.drag_origin, response.interact_pointer_pos())
            {
                let rect = Rect::from_two_pos(origin, current)
                    .intersect(response.rect)
                    .expand2(vec2(0.0, 2.0));
                self.selection_rect = Some(rect);
                self.document.selection = SelectionSnapshot::range(key.clone(), 0, text.len());
            }
        }
        if response.clicked() {
            // A plain click collapses the selection to a caret.
            self.selection_rect = None;
            self.document.selection = SelectionSnapshot::caret(key.clone(), 0);
        }
    }

    fn show_media_block(&mut self, ui: &mut egui::Ui) {
        let key = BlockKey::new("media");
        let Some(block) = self.document.block(&key) else {
            return;
        };
        let DemoBlockContent::Media { data, aspect_ratio } = &block.content else {
            return;
        };
        let width = BlockDimensionData::from_block_data(data)
            .map(|d| d.width)
            .unwrap_or(DEFAULT_MEDIA_WIDTH);
        let size = vec2(width, width / aspect_ratio);

        let (container, response) = ui.allocate_exact_size(size, Sense::click());
        ui.painter()
            .rect_filled(container, 4.0, ui.visuals().extreme_bg_color);
        ui.painter().rect_stroke(
            container,
            4.0,
            egui::Stroke::new(1.0, Color32::from_gray(90)),
        );

        if response.clicked() {
            self.media_focused = !self.media_focused;
        }

        if self.media_focused {
            let committed = show_resize_overlay(
                ui,
                &mut self.resize,
                &mut self.document,
                &key,
                container,
                self.config.handle_size,
            );
            if let Some(width) = committed {
                info!("media block committed width {width:.1}");
                // The host restores focus to the block after the commit; that
                // focus event must not flash the toolbar.
                self.monitor.suppress_next();
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let root_rect = ui.max_rect();

            let blocks: Vec<(BlockKey, Option<String>)> = self
                .document
                .blocks
                .iter()
                .map(|b| {
                    let text = match &b.content {
                        DemoBlockContent::Text(text) => Some(text.clone()),
                        DemoBlockContent::Media { .. } => None,
                    };
                    (b.key.clone(), text)
                })
                .collect();
            for (key, text) in blocks {
                match text {
                    Some(text) => self.show_text_block(ui, &key, &text),
                    None => self.show_media_block(ui),
                }
                ui.add_space(8.0);
            }

            self.monitor
                .on_change(&self.store, self.document.selection.clone());

            let intent = self.toolbar_intent.load(Ordering::SeqCst);
            let selection_rect = self.selection_rect;
            let gap = self.config.toolbar_gap;
            self.motion.sync(intent, || {
                toolbar_position(root_rect, TOOLBAR_SIZE, selection_rect, gap)
            });
        });

        let store = self.store.clone();
        show_floating_toolbar(ctx, &self.store, &mut self.motion, |ui| {
            if ui.button("Bold").clicked() {
                info!("toolbar: bold");
            }
            if ui.button("Italic").clicked() {
                info!("toolbar: italic");
            }
            if ui.button("Link").clicked() {
                let store_in_form = store.clone();
                set_override_content(
                    &store,
                    Arc::new(move |ui: &mut egui::Ui| {
                        ui.label("link target:");
                        if ui.button("done").clicked() {
                            clear_override_content(&store_in_form);
                        }
                    }),
                );
            }
        });

        // Transitions repaint until they settle.
        if self.motion.phase().is_transitioning() {
            ctx.request_repaint();
        }
    }
}

impl Drop for EditorApp {
    fn drop(&mut self) {
        self.store
            .unsubscribe(SELECTION_KEY, &self.selection_subscriber);
        self.resize.cancel();
    }
}

/// Run the demo editor in a native window.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_demo() -> eframe::Result {
    env_logger::init();
    eframe::run_native(
        "richtext_kit demo",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(EditorApp::new(cc)))),
    )
}
