//! Drag gesture protocol and the position-to-intensity mapping.

use log::warn;

/// A horizontal drag event from the gesture source.
///
/// `dx` is the cumulative horizontal translation since [`GestureEvent::Start`],
/// in the same unit as the reference span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The finger went down.
    Start,
    /// The finger moved.
    Update {
        /// Cumulative translation.
        dx: f32,
    },
    /// The finger lifted.
    End {
        /// Cumulative translation at release.
        dx: f32,
    },
}

/// Map a drag translation to a raw delta in `[-1, 1]`.
///
/// `-span` maps to -1, 0 to 0 and `+span` to +1; anything beyond saturates.
/// Non-finite translations count as no movement.
pub fn normalized_delta(dx: f32, span: f32) -> f32 {
    if !dx.is_finite() {
        warn!("ignoring non-finite drag translation {}", dx);
        return 0.0;
    }
    (dx / span).clamp(-1.0, 1.0)
}

/// Intensity reached by dragging `dx` from `base`, clamped to `[0, 1]`.
pub fn target_intensity(base: f32, dx: f32, span: f32) -> f32 {
    (base + normalized_delta(dx, span)).clamp(0.0, 1.0)
}
