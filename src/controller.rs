//! Ring-light intensity controller.

use crate::animator::{Animator, Channel, Transition};
use crate::config::RingLightConfig;
use crate::error::{ConfigError, GestureError};
use crate::gesture::{self, GestureEvent};
use crate::overlay::{GlowLayout, IndicatorView, RingLight, Size};
use crate::state::{ControllerState, Phase};
use crate::timer::{AutoHideTimer, PendingHide};
use crate::tween::TweenAnimator;

use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};

/// Interaction width assumed until the surface reports its real size.
const DEFAULT_INTERACTION_WIDTH: f32 = 400.0;

/// The outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    /// Target before snapping.
    pub raw_target: f32,
    /// Target after snapping; intensity animates here.
    pub target: f32,
    /// Delay of the auto-hide armed for this settle.
    pub hide_after: Duration,
}

/// Owns the ring-light intensity and the indicator's visibility.
///
/// The controller consumes drag gestures, applies the live intensity while
/// dragging, snaps and animates it on release, and hides the indicator after
/// a delay chosen by the settled level. Time is passed in by the caller;
/// call [`IntensityController::tick`] from the frame loop so pending hides
/// can fire.
///
/// # Example
///
/// ```
/// use ringlight_core::{InstantAnimator, IntensityController, Phase};
/// use std::time::{Duration, Instant};
///
/// let mut controller = IntensityController::new(InstantAnimator::new())
///     .with_reference_span(200.0)?;
/// let t0 = Instant::now();
///
/// controller.gesture_start()?;
/// controller.gesture_update(100.0)?;
/// assert_eq!(controller.intensity(), 0.5);
///
/// let settle = controller.gesture_end(100.0, t0)?;
/// assert_eq!(settle.hide_after, Duration::from_millis(1000));
///
/// controller.tick(t0 + settle.hide_after);
/// assert_eq!(controller.phase(), Phase::Idle);
/// assert!(!controller.is_visible());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct IntensityController<A: Animator = TweenAnimator> {
    animator: A,
    config: RingLightConfig,
    reference_span: f32,
    phase: Phase,
    intensity: f32,
    base_intensity: f32,
    visible: bool,
    timer: AutoHideTimer,
}

impl IntensityController<TweenAnimator> {
    /// Create a controller driven by a [`TweenAnimator`] with the default config.
    pub fn tweened() -> Self {
        Self::new(TweenAnimator::new())
    }
}

impl<A: Animator> IntensityController<A> {
    /// Create a controller with the default config.
    pub fn new(animator: A) -> Self {
        Self::from_parts(animator, RingLightConfig::default())
    }

    /// Create a controller with a custom config.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`RingLightConfig::validate`].
    pub fn with_config(animator: A, config: RingLightConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(animator, config))
    }

    fn from_parts(mut animator: A, config: RingLightConfig) -> Self {
        animator.animate(Channel::Intensity, 0.0, Transition::Immediate);
        animator.animate(Channel::IndicatorOpacity, 0.0, Transition::Immediate);
        animator.animate(
            Channel::IndicatorScale,
            config.hidden_scale,
            Transition::Immediate,
        );

        Self {
            reference_span: DEFAULT_INTERACTION_WIDTH * config.reference_span_fraction,
            animator,
            config,
            phase: Phase::Idle,
            intensity: 0.0,
            base_intensity: 0.0,
            visible: false,
            timer: AutoHideTimer::new(),
        }
    }

    /// Replace the reference span with an explicit distance.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSpan`] if `span` is not a positive finite number.
    pub fn with_reference_span(mut self, span: f32) -> Result<Self, ConfigError> {
        self.set_reference_span(span)?;
        Ok(self)
    }

    /// Set the reference span directly.
    pub fn set_reference_span(&mut self, span: f32) -> Result<(), ConfigError> {
        if !(span.is_finite() && span > 0.0) {
            return Err(ConfigError::InvalidSpan(span));
        }
        self.reference_span = span;
        info!("reference span set to {}", span);
        Ok(())
    }

    /// Derive the reference span from the width of the interaction surface.
    pub fn set_interaction_width(&mut self, width: f32) -> Result<(), ConfigError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::InvalidSpan(width));
        }
        self.set_reference_span(width * self.config.reference_span_fraction)
    }

    /// The drag distance that maps to a full ±1 change in intensity.
    pub fn reference_span(&self) -> f32 {
        self.reference_span
    }

    // -------------------------------------------------------------------------
    // Gesture handling
    // -------------------------------------------------------------------------

    /// Begin a drag session.
    ///
    /// Cancels any pending auto-hide, captures the currently displayed
    /// intensity as the session base and shows the indicator without a fade.
    pub fn gesture_start(&mut self) -> Result<(), GestureError> {
        if self.phase == Phase::Dragging {
            warn!("gesture start while already dragging, ignored");
            return Err(GestureError::AlreadyDragging);
        }

        if let Some(cancelled) = self.timer.cancel() {
            debug!("gesture start cancelled auto-hide {:?}", cancelled.id);
        }

        // Start from wherever a running settle has got to, and stop it there.
        let base = self.animator.value(Channel::Intensity).clamp(0.0, 1.0);
        self.animator
            .animate(Channel::Intensity, base, Transition::Immediate);
        self.base_intensity = base;
        self.intensity = base;

        self.visible = true;
        self.animator
            .animate(Channel::IndicatorOpacity, 1.0, Transition::Immediate);
        self.animator.animate(
            Channel::IndicatorScale,
            1.0,
            Transition::Spring(self.config.indicator_spring),
        );

        self.phase = Phase::Dragging;
        debug!("gesture started at intensity {}", base);
        Ok(())
    }

    /// Track a drag translation, applying the new intensity immediately.
    ///
    /// Returns the new intensity.
    pub fn gesture_update(&mut self, dx: f32) -> Result<f32, GestureError> {
        if self.phase != Phase::Dragging {
            warn!("gesture update without a session, ignored");
            return Err(GestureError::NoActiveGesture);
        }

        let intensity = gesture::target_intensity(self.base_intensity, dx, self.reference_span);
        self.intensity = intensity;
        self.animator
            .animate(Channel::Intensity, intensity, Transition::Immediate);
        trace!("dx={} -> intensity={}", dx, intensity);
        Ok(intensity)
    }

    /// Finish a drag: snap the target, animate to it and arm the auto-hide.
    pub fn gesture_end(&mut self, dx: f32, now: Instant) -> Result<Settle, GestureError> {
        if self.phase != Phase::Dragging {
            warn!("gesture end without a session, ignored");
            return Err(GestureError::NoActiveGesture);
        }

        let raw_target = gesture::target_intensity(self.base_intensity, dx, self.reference_span);
        let target = self.config.snap(raw_target);
        self.intensity = target;
        self.animator.animate(
            Channel::Intensity,
            target,
            Transition::timing(self.config.settle_duration, self.config.settle_easing),
        );

        let hide_after = self.config.hide_delays.for_target(target);
        self.timer.arm(now, hide_after);
        self.phase = Phase::Settling;

        debug!(
            "gesture ended: raw={}, target={}, hide after {:?}",
            raw_target, target, hide_after
        );
        Ok(Settle {
            raw_target,
            target,
            hide_after,
        })
    }

    /// Dispatch one gesture event.
    pub fn handle(&mut self, event: GestureEvent, now: Instant) -> Result<(), GestureError> {
        match event {
            GestureEvent::Start => self.gesture_start(),
            GestureEvent::Update { dx } => self.gesture_update(dx).map(|_| ()),
            GestureEvent::End { dx } => self.gesture_end(dx, now).map(|_| ()),
        }
    }

    /// Fire the auto-hide if it is due. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.poll(now) {
            Some(fired) => {
                self.fire_auto_hide(fired);
                true
            }
            None => false,
        }
    }

    fn fire_auto_hide(&mut self, fired: PendingHide) {
        let transition = Transition::timing(self.config.hide_duration, self.config.settle_easing);
        self.animator
            .animate(Channel::IndicatorOpacity, 0.0, transition);
        self.animator
            .animate(Channel::IndicatorScale, self.config.hidden_scale, transition);
        self.visible = false;
        self.phase = Phase::Idle;
        debug!(
            "indicator hidden after {:?} at intensity {}",
            fired.duration, self.intensity
        );
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Get a snapshot of the current controller state.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            phase: self.phase,
            intensity: self.intensity,
            base_intensity: self.base_intensity,
            visible: self.visible,
            pending_hide: self.timer.pending().copied(),
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Committed intensity: the live value while dragging, the target once released.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// The intensity the renderer should draw this frame.
    pub fn displayed_intensity(&self) -> f32 {
        self.animator.value(Channel::Intensity).clamp(0.0, 1.0)
    }

    /// Whether the indicator is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The pending auto-hide, if any.
    pub fn pending_hide(&self) -> Option<&PendingHide> {
        self.timer.pending()
    }

    /// Whether the frame loop still has work: an animation or a pending hide.
    pub fn needs_frames(&self) -> bool {
        self.animator.is_animating() || self.timer.pending().is_some()
    }

    /// Edge and corner glow geometry for the current displayed intensity.
    pub fn glow_layout(&self, surface: Size) -> GlowLayout {
        RingLight::from_config(&self.config).layout(self.displayed_intensity(), surface)
    }

    /// What the indicator renderer should draw this frame.
    pub fn indicator(&self) -> IndicatorView {
        IndicatorView::from_animator(&self.animator, self.visible)
    }

    /// The active config.
    pub fn config(&self) -> &RingLightConfig {
        &self.config
    }

    /// The injected animator.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access to the injected animator, e.g. to advance it per frame.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InstantAnimator;

    fn controller() -> IntensityController<InstantAnimator> {
        IntensityController::new(InstantAnimator::new())
            .with_reference_span(200.0)
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ctl = controller();
        let state = ctl.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.intensity, 0.0);
        assert!(!state.visible);
        assert!(state.pending_hide.is_none());
        assert_eq!(ctl.animator().value(Channel::IndicatorScale), 0.8);
    }

    #[test]
    fn test_interaction_width_sets_span() {
        let mut ctl = controller();
        ctl.set_interaction_width(420.0).unwrap();
        assert_eq!(ctl.reference_span(), 210.0);

        assert_eq!(
            ctl.set_interaction_width(0.0),
            Err(ConfigError::InvalidSpan(0.0))
        );
        assert!(ctl.set_reference_span(f32::NAN).is_err());
        assert_eq!(ctl.reference_span(), 210.0);
    }

    #[test]
    fn test_update_without_start_is_rejected() {
        let mut ctl = controller();
        assert_eq!(
            ctl.gesture_update(50.0),
            Err(GestureError::NoActiveGesture)
        );
        assert_eq!(
            ctl.gesture_end(50.0, Instant::now()),
            Err(GestureError::NoActiveGesture)
        );
        assert_eq!(ctl.intensity(), 0.0);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn test_overlapping_start_is_rejected() {
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        ctl.gesture_update(100.0).unwrap();
        assert_eq!(ctl.gesture_start(), Err(GestureError::AlreadyDragging));
        assert_eq!(ctl.state().base_intensity, 0.0);
        assert_eq!(ctl.intensity(), 0.5);
    }

    #[test]
    fn test_start_shows_indicator_without_fade() {
        let mut ctl = controller();
        ctl.animator_mut().clear_history();
        ctl.gesture_start().unwrap();

        assert!(ctl.is_visible());
        let opacity = ctl.animator().last_request(Channel::IndicatorOpacity).unwrap();
        assert_eq!(opacity.target, 1.0);
        assert_eq!(opacity.transition, Transition::Immediate);
        let scale = ctl.animator().last_request(Channel::IndicatorScale).unwrap();
        assert!(matches!(scale.transition, Transition::Spring(_)));
    }

    #[test]
    fn test_update_does_not_arm_timer() {
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        for dx in [10.0, 80.0, -30.0, 150.0] {
            ctl.gesture_update(dx).unwrap();
            assert!(ctl.pending_hide().is_none());
            assert!(ctl.is_visible());
        }
    }

    #[test]
    fn test_update_is_applied_immediately() {
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        ctl.gesture_update(50.0).unwrap();

        let req = ctl.animator().last_request(Channel::Intensity).unwrap();
        assert_eq!(req.target, 0.25);
        assert_eq!(req.transition, Transition::Immediate);
        assert_eq!(ctl.displayed_intensity(), 0.25);
    }

    #[test]
    fn test_settle_uses_configured_timing() {
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        ctl.gesture_end(100.0, Instant::now()).unwrap();

        let req = ctl.animator().last_request(Channel::Intensity).unwrap();
        assert_eq!(req.target, 0.5);
        assert_eq!(
            req.transition,
            Transition::timing(Duration::from_millis(300), crate::Easing::EaseOut)
        );
    }

    #[test]
    fn test_tick_before_deadline_keeps_indicator() {
        let t0 = Instant::now();
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        ctl.gesture_end(0.0, t0).unwrap();

        assert!(!ctl.tick(t0 + Duration::from_millis(249)));
        assert!(ctl.is_visible());
        assert!(ctl.tick(t0 + Duration::from_millis(250)));
        assert!(!ctl.is_visible());
        assert!(!ctl.tick(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_fire_hides_indicator() {
        let t0 = Instant::now();
        let mut ctl = controller();
        ctl.gesture_start().unwrap();
        ctl.gesture_end(200.0, t0).unwrap();
        ctl.tick(t0 + Duration::from_millis(500));

        assert_eq!(ctl.phase(), Phase::Idle);
        let opacity = ctl.animator().last_request(Channel::IndicatorOpacity).unwrap();
        assert_eq!(opacity.target, 0.0);
        assert!(matches!(opacity.transition, Transition::Timing { .. }));
        assert_eq!(ctl.animator().value(Channel::IndicatorScale), 0.8);
        // The light itself stays on.
        assert_eq!(ctl.displayed_intensity(), 1.0);
    }

    #[test]
    fn test_needs_frames_while_hide_pending() {
        let t0 = Instant::now();
        let mut ctl = controller();
        assert!(!ctl.needs_frames());
        ctl.gesture_start().unwrap();
        ctl.gesture_end(60.0, t0).unwrap();
        assert!(ctl.needs_frames());
        ctl.tick(t0 + Duration::from_secs(1));
        assert!(!ctl.needs_frames());
    }

    #[test]
    fn test_handle_dispatches_protocol() {
        let t0 = Instant::now();
        let mut ctl = controller();
        ctl.handle(GestureEvent::Start, t0).unwrap();
        ctl.handle(GestureEvent::Update { dx: 40.0 }, t0).unwrap();
        assert_eq!(ctl.intensity(), 0.2);
        ctl.handle(GestureEvent::End { dx: 40.0 }, t0).unwrap();
        assert_eq!(ctl.phase(), Phase::Settling);
        assert_eq!(
            ctl.handle(GestureEvent::Update { dx: 1.0 }, t0),
            Err(GestureError::NoActiveGesture)
        );
    }

    #[test]
    fn test_with_config_validates() {
        let bad = RingLightConfig {
            hidden_scale: 1.5,
            ..Default::default()
        };
        assert!(IntensityController::with_config(InstantAnimator::new(), bad).is_err());
    }

    #[test]
    fn test_with_config_rejects_massless_spring() {
        let bad = RingLightConfig {
            indicator_spring: crate::SpringConfig {
                mass: 0.0,
                ..crate::SpringConfig::DEFAULT
            },
            ..Default::default()
        };
        assert!(matches!(
            IntensityController::with_config(TweenAnimator::new(), bad),
            Err(ConfigError::OutOfRange {
                field: "indicator_spring.mass",
                ..
            })
        ));
    }

    #[test]
    fn test_start_interrupting_tweened_settle_keeps_current_value() {
        let t0 = Instant::now();
        let mut ctl = IntensityController::tweened()
            .with_reference_span(200.0)
            .unwrap();
        ctl.animator_mut().advance(t0);

        ctl.gesture_start().unwrap();
        ctl.gesture_end(150.0, t0).unwrap();
        ctl.animator_mut().advance(t0);
        ctl.animator_mut().advance(t0 + Duration::from_millis(100));

        let mid = ctl.displayed_intensity();
        assert!(mid > 0.0 && mid < 0.75, "mid = {}", mid);

        ctl.gesture_start().unwrap();
        assert_eq!(ctl.state().base_intensity, mid);
        ctl.animator_mut().advance(t0 + Duration::from_millis(400));
        assert_eq!(ctl.displayed_intensity(), mid);
    }
}
