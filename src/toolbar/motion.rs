use crate::toolbar::position::ToolbarPosition;
use crate::util::time::Clock;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

/// Deadline after which a stuck transition is force-completed.
pub const DEFAULT_MOTION_DEADLINE: Duration = Duration::from_millis(1000);

/// Visual phase of the floating toolbar.
///
/// The cycle is `Hidden → Entering → Visible → Leaving → Hidden`; there is no
/// terminal phase. `Entering` and `Leaving` are the animated transitions and
/// are the only phases the deadline guard watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarPhase {
    #[default]
    Hidden,
    Entering,
    Visible,
    Leaving,
}

impl ToolbarPhase {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Entering | Self::Leaving)
    }

    /// Whether this phase is headed toward (or at) visibility.
    pub fn targets_visible(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

/// Show/hide state machine for the floating toolbar.
///
/// Driven from three sides each frame: [`sync`](Self::sync) with the latest
/// visibility intent, [`complete_transition`](Self::complete_transition) when
/// the render layer's animation finishes, and
/// [`poll_deadline`](Self::poll_deadline) as the guard against a completion
/// signal that never arrives (the animation equivalent of a missed
/// `animationend`). The placement is prepared on entry to `Entering`, before
/// anything becomes visible, so the toolbar never jumps into place.
pub struct ToolbarMotion {
    phase: ToolbarPhase,
    position: Option<ToolbarPosition>,
    phase_started: Option<Duration>,
    deadline: Duration,
    clock: Arc<dyn Clock>,
}

impl ToolbarMotion {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            phase: ToolbarPhase::Hidden,
            position: None,
            phase_started: None,
            deadline: DEFAULT_MOTION_DEADLINE,
            clock,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn phase(&self) -> ToolbarPhase {
        self.phase
    }

    /// Placement computed by the last prepare step. `Some` from the moment
    /// `Entering` starts until the toolbar is hidden again.
    pub fn position(&self) -> Option<ToolbarPosition> {
        self.position
    }

    /// Whether the toolbar element should be in the scene at all (any phase
    /// but `Hidden`).
    pub fn is_shown(&self) -> bool {
        self.phase != ToolbarPhase::Hidden
    }

    /// Drive the machine with the current visibility intent.
    ///
    /// `prepare` runs when a show transition starts and supplies the
    /// placement; a `None` placement (degenerate selection) aborts the show
    /// and the machine stays `Hidden`, never reaching `Visible`. An intent
    /// flip mid-transition reverses the transition in place.
    pub fn sync(
        &mut self,
        visible: bool,
        prepare: impl FnOnce() -> Option<ToolbarPosition>,
    ) {
        match (self.phase, visible) {
            (ToolbarPhase::Hidden, true) | (ToolbarPhase::Leaving, true) => {
                match prepare() {
                    Some(position) => {
                        self.position = Some(position);
                        self.enter_phase(ToolbarPhase::Entering);
                    }
                    None => {
                        debug!("toolbar show aborted: no selection rectangle");
                        self.position = None;
                        self.enter_phase(ToolbarPhase::Hidden);
                    }
                }
            }
            (ToolbarPhase::Visible, false) | (ToolbarPhase::Entering, false) => {
                self.enter_phase(ToolbarPhase::Leaving);
            }
            _ => {}
        }
    }

    /// Completion signal from the render layer's animation.
    ///
    /// `Entering` settles to `Visible`, `Leaving` settles to `Hidden`;
    /// steady phases ignore the signal.
    pub fn complete_transition(&mut self) {
        match self.phase {
            ToolbarPhase::Entering => self.enter_phase(ToolbarPhase::Visible),
            ToolbarPhase::Leaving => {
                self.position = None;
                self.enter_phase(ToolbarPhase::Hidden);
            }
            _ => {}
        }
    }

    /// Force-complete a transition that outlived the deadline. Returns true
    /// when a transition was forced.
    pub fn poll_deadline(&mut self) -> bool {
        let Some(started) = self.phase_started else {
            return false;
        };
        if !self.phase.is_transitioning() {
            return false;
        }
        if self.clock.now().saturating_sub(started) < self.deadline {
            return false;
        }

        warn!(
            "toolbar {:?} transition missed its completion signal; forcing",
            self.phase
        );
        self.complete_transition();
        true
    }

    fn enter_phase(&mut self, phase: ToolbarPhase) {
        if phase != self.phase {
            debug!("toolbar phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.phase_started = phase.is_transitioning().then(|| self.clock.now());
    }
}

impl std::fmt::Debug for ToolbarMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolbarMotion")
            .field("phase", &self.phase)
            .field("position", &self.position)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
