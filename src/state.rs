//! Controller state snapshot.

use crate::timer::PendingHide;

/// Where the controller is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No gesture; the indicator is hidden or fading out.
    #[default]
    Idle,
    /// A drag is in progress and intensity tracks it live.
    Dragging,
    /// The drag ended; intensity is animating to its target and a hide is pending.
    Settling,
}

/// A snapshot of the controller's current state.
///
/// Use [`IntensityController::state`](crate::IntensityController::state) to obtain a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    /// The current phase.
    pub phase: Phase,
    /// Committed intensity (0-1): the live drag value, or the settle target.
    pub intensity: f32,
    /// Intensity at the start of the current or last gesture (0-1).
    pub base_intensity: f32,
    /// Whether the indicator is shown.
    pub visible: bool,
    /// The pending auto-hide, if any.
    pub pending_hide: Option<PendingHide>,
}
