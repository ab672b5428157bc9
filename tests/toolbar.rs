use egui::{Rect, pos2, vec2};
use richtext_kit::selection::{SELECTION_KEY, SelectionMonitor, SelectionSnapshot, toolbar_visible};
use richtext_kit::store::PluginStore;
use richtext_kit::toolbar::{ToolbarMotion, ToolbarPhase, ToolbarPosition, toolbar_position};
use richtext_kit::util::time::ManualClock;
use richtext_kit::BlockKey;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn rect(left: f32, top: f32, width: f32, height: f32) -> Rect {
    Rect::from_min_size(pos2(left, top), vec2(width, height))
}

fn snapshot(collapsed: bool, has_focus: bool) -> SelectionSnapshot {
    SelectionSnapshot {
        collapsed,
        has_focus,
        ..SelectionSnapshot::default()
    }
}

#[test]
fn visibility_truth_table() {
    assert!(toolbar_visible(&snapshot(false, true)));
    assert!(!toolbar_visible(&snapshot(false, false)));
    assert!(!toolbar_visible(&snapshot(true, true)));
    assert!(!toolbar_visible(&snapshot(true, false)));
}

#[test]
fn monitor_publishes_only_real_changes() {
    let store = PluginStore::new();
    let monitor = SelectionMonitor::new();
    let published = Arc::new(AtomicUsize::new(0));

    let published_in_cb = published.clone();
    store.subscribe(
        SELECTION_KEY,
        Arc::new(move |_| {
            published_in_cb.fetch_add(1, Ordering::SeqCst);
        }),
    );

    let range = SelectionSnapshot::range(BlockKey::new("b"), 0, 4);
    monitor.on_change(&store, range.clone());
    monitor.on_change(&store, range.clone()); // unchanged, silent
    monitor.on_change(&store, SelectionSnapshot::caret(BlockKey::new("b"), 4));

    assert_eq!(published.load(Ordering::SeqCst), 2);
}

#[test]
fn suppression_consumes_exactly_one_update() {
    let store = PluginStore::new();
    let monitor = SelectionMonitor::new();
    let published = Arc::new(AtomicUsize::new(0));

    let published_in_cb = published.clone();
    store.subscribe(
        SELECTION_KEY,
        Arc::new(move |_| {
            published_in_cb.fetch_add(1, Ordering::SeqCst);
        }),
    );

    monitor.suppress_next();
    // The update right after a programmatic focus is swallowed...
    monitor.on_change(&store, SelectionSnapshot::range(BlockKey::new("b"), 0, 4));
    assert_eq!(published.load(Ordering::SeqCst), 0);

    // ...and the flag resets: the next update goes through.
    monitor.on_change(&store, SelectionSnapshot::range(BlockKey::new("b"), 0, 4));
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn position_flips_below_when_no_room_above() {
    let root = rect(0.0, 100.0, 500.0, 500.0);
    let toolbar = vec2(100.0, 40.0);

    // 120 - 40 - 8 = 72 < root.top(100): flip below the selection.
    let cramped = rect(200.0, 120.0, 50.0, 20.0);
    let placed = toolbar_position(root, toolbar, Some(cramped), 8.0).expect("placement");
    assert!(placed.reverse);
    assert_eq!(placed.top, 148.0); // 120 + 20 + 8

    // 300 - 40 - 8 = 252 >= 100: stays above.
    let roomy = rect(200.0, 300.0, 50.0, 20.0);
    let placed = toolbar_position(root, toolbar, Some(roomy), 8.0).expect("placement");
    assert!(!placed.reverse);
    assert_eq!(placed.top, 252.0);
}

#[test]
fn position_centers_then_clamps_horizontally() {
    let root = rect(0.0, 100.0, 500.0, 500.0);
    let toolbar = vec2(100.0, 40.0);

    // Centered: selection midpoint 225, half the toolbar back is 175.
    let mid = rect(200.0, 300.0, 50.0, 20.0);
    let placed = toolbar_position(root, toolbar, Some(mid), 8.0).expect("placement");
    assert_eq!(placed.left, 175.0);

    // Hugging the left edge clamps to root.left.
    let left_edge = rect(0.0, 300.0, 20.0, 20.0);
    let placed = toolbar_position(root, toolbar, Some(left_edge), 8.0).expect("placement");
    assert_eq!(placed.left, 0.0);

    // Hugging the right edge clamps to root.right - toolbar width.
    let right_edge = rect(480.0, 300.0, 20.0, 20.0);
    let placed = toolbar_position(root, toolbar, Some(right_edge), 8.0).expect("placement");
    assert_eq!(placed.left, 400.0);
}

#[test]
fn degenerate_selection_yields_no_position() {
    let root = rect(0.0, 0.0, 500.0, 500.0);
    assert_eq!(toolbar_position(root, vec2(100.0, 40.0), None, 8.0), None);
}

fn prepared() -> Option<ToolbarPosition> {
    Some(ToolbarPosition {
        top: 10.0,
        left: 20.0,
        reverse: false,
    })
}

#[test]
fn phase_machine_walks_the_full_cycle() {
    let clock = Arc::new(ManualClock::new());
    let mut motion = ToolbarMotion::new(clock);

    assert_eq!(motion.phase(), ToolbarPhase::Hidden);
    assert!(!motion.is_shown());

    motion.sync(true, prepared);
    assert_eq!(motion.phase(), ToolbarPhase::Entering);
    // Placement applied before anything becomes visible.
    assert_eq!(motion.position(), prepared());

    motion.complete_transition();
    assert_eq!(motion.phase(), ToolbarPhase::Visible);

    motion.sync(false, || unreachable!("hide needs no prepare"));
    assert_eq!(motion.phase(), ToolbarPhase::Leaving);

    motion.complete_transition();
    assert_eq!(motion.phase(), ToolbarPhase::Hidden);
    assert_eq!(motion.position(), None);
}

#[test]
fn degenerate_placement_aborts_the_show() {
    let clock = Arc::new(ManualClock::new());
    let mut motion = ToolbarMotion::new(clock);

    motion.sync(true, || None);
    assert_eq!(motion.phase(), ToolbarPhase::Hidden);
    assert_eq!(motion.position(), None);

    // A stray completion signal while hidden stays a no-op.
    motion.complete_transition();
    assert_eq!(motion.phase(), ToolbarPhase::Hidden);
}

#[test]
fn deadline_forces_a_stuck_transition() {
    let clock = Arc::new(ManualClock::new());
    let mut motion = ToolbarMotion::new(clock.clone());

    motion.sync(true, prepared);
    assert_eq!(motion.phase(), ToolbarPhase::Entering);

    clock.advance(Duration::from_millis(999));
    assert!(!motion.poll_deadline());
    assert_eq!(motion.phase(), ToolbarPhase::Entering);

    clock.advance(Duration::from_millis(1));
    assert!(motion.poll_deadline());
    assert_eq!(motion.phase(), ToolbarPhase::Visible);

    // Same guard on the way out.
    motion.sync(false, || None);
    clock.advance(Duration::from_millis(1000));
    assert!(motion.poll_deadline());
    assert_eq!(motion.phase(), ToolbarPhase::Hidden);
}

#[test]
fn intent_flip_mid_transition_reverses_it() {
    let clock = Arc::new(ManualClock::new());
    let mut motion = ToolbarMotion::new(clock);

    motion.sync(true, prepared);
    motion.sync(false, || None);
    assert_eq!(motion.phase(), ToolbarPhase::Leaving);

    motion.sync(true, prepared);
    assert_eq!(motion.phase(), ToolbarPhase::Entering);
}

#[test]
fn custom_deadline_is_respected() {
    let clock = Arc::new(ManualClock::new());
    let mut motion = ToolbarMotion::new(clock.clone()).with_deadline(Duration::from_millis(100));

    motion.sync(true, prepared);
    clock.advance(Duration::from_millis(100));
    assert!(motion.poll_deadline());
    assert_eq!(motion.phase(), ToolbarPhase::Visible);
}
