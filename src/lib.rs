//! Gesture-driven ring-light for camera mirror screens.
//!
//! A mirror screen shows the front camera with a soft white glow along the
//! screen edges. Dragging horizontally changes the glow's intensity. A
//! slider indicator appears while dragging and hides itself after a delay
//! that depends on where the light settled.
//!
//! This crate holds the logic behind that screen:
//!
//! - [`IntensityController`]: the gesture state machine and auto-hide policy
//! - [`Animator`]: the seam to whatever moves values on screen, with
//!   [`TweenAnimator`] for frame loops and [`InstantAnimator`] for tests
//! - [`RingLight`] and [`IndicatorView`]: toolkit-independent geometry for
//!   the renderer
//!
//! Camera capture, gesture recognition and drawing stay with the host
//! toolkit.
//!
//! # Example
//!
//! ```
//! use ringlight_core::{IntensityController, Phase, Size};
//! use std::time::{Duration, Instant};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut controller = IntensityController::tweened();
//!     controller.set_interaction_width(400.0)?;
//!
//!     let t0 = Instant::now();
//!     controller.animator_mut().advance(t0);
//!
//!     // Drag right by a quarter of the screen and let go.
//!     controller.gesture_start()?;
//!     controller.gesture_update(100.0)?;
//!     let settle = controller.gesture_end(100.0, t0)?;
//!     assert_eq!(settle.target, 0.5);
//!
//!     // Drive the frame loop until the indicator hides.
//!     let mut now = t0;
//!     while controller.needs_frames() {
//!         now += Duration::from_millis(16);
//!         controller.animator_mut().advance(now);
//!         controller.tick(now);
//!     }
//!
//!     assert_eq!(controller.phase(), Phase::Idle);
//!     let glow = controller.glow_layout(Size::new(400.0, 800.0));
//!     assert_eq!(glow.alpha, 0.5);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Use [`InstantAnimator`] to test code without a frame loop:
//!
//! ```
//! use ringlight_core::{Animator, Channel, InstantAnimator, IntensityController};
//!
//! let mut controller = IntensityController::new(InstantAnimator::new());
//! controller.gesture_start().unwrap();
//! assert_eq!(controller.animator().value(Channel::IndicatorOpacity), 1.0);
//! ```

#![warn(missing_docs)]

mod animator;
mod config;
mod controller;
mod error;
mod gesture;
mod mock;
mod overlay;
mod state;
mod timer;
mod tween;

// Re-export public API
pub use animator::{Animator, Channel, Easing, SpringConfig, Transition};
pub use config::{HideDelays, RingLightConfig};
pub use controller::{IntensityController, Settle};
pub use error::{ConfigError, GestureError};
pub use gesture::{GestureEvent, normalized_delta, target_intensity};
pub use mock::{AnimationRequest, InstantAnimator};
pub use overlay::{Backdrop, Corners, Edges, GlowLayout, IndicatorView, Rect, RingLight, Size};
pub use state::{ControllerState, Phase};
pub use timer::{AutoHideTimer, PendingHide, TimerId};
pub use tween::TweenAnimator;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    const SPAN: f32 = 200.0;

    fn controller() -> IntensityController<InstantAnimator> {
        IntensityController::new(InstantAnimator::new())
            .with_reference_span(SPAN)
            .unwrap()
    }

    /// Run one full drag from the current intensity and return the settle.
    fn drag(ctl: &mut IntensityController<InstantAnimator>, dx: f32, now: Instant) -> Settle {
        ctl.gesture_start().unwrap();
        ctl.gesture_update(dx).unwrap();
        ctl.gesture_end(dx, now).unwrap()
    }

    /// Bring a fresh controller to a settled intensity of 0.5 with the indicator hidden.
    fn at_half(t0: Instant) -> IntensityController<InstantAnimator> {
        let mut ctl = controller();
        drag(&mut ctl, SPAN / 2.0, t0);
        assert!(ctl.tick(t0 + Duration::from_secs(1)));
        assert_eq!(ctl.intensity(), 0.5);
        ctl
    }

    #[test]
    fn test_scenario_half_drag_settles_without_snap() {
        let t0 = Instant::now();
        let mut ctl = controller();

        ctl.gesture_start().unwrap();
        assert_eq!(ctl.gesture_update(SPAN / 2.0).unwrap(), 0.5);
        assert_eq!(ctl.intensity(), 0.5);

        let settle = ctl.gesture_end(SPAN / 2.0, t0).unwrap();
        assert_eq!(settle.raw_target, 0.5);
        assert_eq!(settle.target, 0.5);
        assert_eq!(settle.hide_after, Duration::from_millis(1000));
        assert_eq!(ctl.displayed_intensity(), 0.5);
        assert_eq!(ctl.phase(), Phase::Settling);
    }

    #[test]
    fn test_scenario_full_left_drag_turns_off() {
        let t0 = Instant::now();
        let mut ctl = at_half(t0);

        let settle = drag(&mut ctl, -SPAN, t0 + Duration::from_secs(2));
        assert_eq!(settle.raw_target, 0.0);
        assert_eq!(settle.target, 0.0);
        assert_eq!(settle.hide_after, Duration::from_millis(250));
    }

    #[test]
    fn test_scenario_near_full_snaps_on() {
        let t0 = Instant::now();
        let mut ctl = controller();

        let settle = drag(&mut ctl, 0.95 * SPAN, t0);
        assert!((settle.raw_target - 0.95).abs() < 1e-6);
        assert_eq!(settle.target, 1.0);
        assert_eq!(settle.hide_after, Duration::from_millis(500));
        assert_eq!(ctl.displayed_intensity(), 1.0);
    }

    #[test]
    fn test_scenario_overdrag_clamps_to_full() {
        let t0 = Instant::now();
        let mut ctl = at_half(t0);

        let settle = drag(&mut ctl, 2.0 * SPAN, t0 + Duration::from_secs(2));
        assert_eq!(settle.raw_target, 1.0);
        assert_eq!(settle.target, 1.0);
        assert_eq!(settle.hide_after, Duration::from_millis(500));
    }

    #[test]
    fn test_scenario_new_gesture_cancels_pending_hide() {
        let t0 = Instant::now();
        let mut ctl = controller();
        drag(&mut ctl, SPAN / 2.0, t0);
        assert!(ctl.pending_hide().is_some());

        ctl.animator_mut().clear_history();
        ctl.gesture_start().unwrap();
        assert!(ctl.pending_hide().is_none());

        // The old deadline passes during the new drag.
        assert!(!ctl.tick(t0 + Duration::from_secs(5)));
        assert!(ctl.is_visible());
        assert_eq!(ctl.phase(), Phase::Dragging);

        let hid = ctl
            .animator()
            .requests_for(Channel::IndicatorOpacity)
            .any(|req| req.target == 0.0);
        assert!(!hid, "no hide transition expected");
    }

    #[test]
    fn test_next_session_starts_from_settled_value() {
        let t0 = Instant::now();
        let mut ctl = controller();
        drag(&mut ctl, 0.3 * SPAN, t0);

        ctl.gesture_start().unwrap();
        assert!((ctl.state().base_intensity - 0.3).abs() < 1e-6);
        let live = ctl.gesture_update(0.2 * SPAN).unwrap();
        assert!((live - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_small_release_snaps_off() {
        let t0 = Instant::now();
        let mut ctl = controller();

        ctl.gesture_start().unwrap();
        ctl.gesture_update(0.05 * SPAN).unwrap();
        assert!(ctl.intensity() > 0.0);

        let settle = ctl.gesture_end(0.05 * SPAN, t0).unwrap();
        assert_eq!(settle.target, 0.0);
        assert_eq!(settle.hide_after, Duration::from_millis(250));
    }

    #[test]
    fn test_exactly_one_timer_pending_across_settles() {
        let t0 = Instant::now();
        let mut ctl = controller();

        let first = drag(&mut ctl, SPAN / 2.0, t0);
        let first_id = ctl.pending_hide().unwrap().id;
        let t1 = t0 + Duration::from_millis(100);
        drag(&mut ctl, -SPAN, t1);
        let second = *ctl.pending_hide().unwrap();

        assert_ne!(first_id, second.id);
        assert_eq!(first.hide_after, Duration::from_millis(1000));
        assert_eq!(second.deadline, t1 + Duration::from_millis(250));

        // Only the second one fires, and only once.
        assert!(!ctl.tick(second.deadline - Duration::from_millis(1)));
        assert!(ctl.tick(second.deadline));
        assert!(!ctl.tick(t0 + first.hide_after));
    }

    proptest! {
        /// Property: intensity stays in [0, 1] for any drag from any start
        #[test]
        fn intensity_stays_in_unit_range(start in -2.0f32..2.0, dx in -10_000.0f32..10_000.0) {
            let mut ctl = controller();
            drag(&mut ctl, start * SPAN, Instant::now());
            ctl.gesture_start().unwrap();
            let live = ctl.gesture_update(dx).unwrap();
            prop_assert!((0.0..=1.0).contains(&live));
            prop_assert!((0.0..=1.0).contains(&ctl.displayed_intensity()));
        }

        /// Property: translations beyond the span saturate
        #[test]
        fn overdrag_matches_span(base in 0.0f32..1.0, extra in 0.0f32..5_000.0) {
            let mut ctl = controller();
            drag(&mut ctl, base * SPAN, Instant::now());

            ctl.gesture_start().unwrap();
            let at_span = ctl.gesture_update(SPAN).unwrap();
            prop_assert_eq!(ctl.gesture_update(SPAN + extra).unwrap(), at_span);

            let at_neg_span = ctl.gesture_update(-SPAN).unwrap();
            prop_assert_eq!(ctl.gesture_update(-SPAN - extra).unwrap(), at_neg_span);
        }

        /// Property: settle targets snap outside [0.1, 0.9] and pass through inside
        #[test]
        fn settle_obeys_snap_law(dx in -1.5f32..1.5) {
            let mut ctl = controller();
            let settle = drag(&mut ctl, dx * SPAN, Instant::now());
            let raw = settle.raw_target;

            let expected = if raw < 0.1 { 0.0 } else if raw > 0.9 { 1.0 } else { raw };
            prop_assert_eq!(settle.target, expected);
            prop_assert_eq!(ctl.displayed_intensity(), expected);
        }

        /// Property: the hide delay depends only on the settled target
        #[test]
        fn hide_delay_follows_target(dx in -1.5f32..1.5) {
            let t0 = Instant::now();
            let mut ctl = controller();
            let settle = drag(&mut ctl, dx * SPAN, t0);

            let expected = if settle.target == 0.0 {
                Duration::from_millis(250)
            } else if settle.target == 1.0 {
                Duration::from_millis(500)
            } else {
                Duration::from_millis(1000)
            };
            prop_assert_eq!(settle.hide_after, expected);
            prop_assert_eq!(ctl.pending_hide().map(|p| p.deadline), Some(t0 + expected));
        }
    }
}
