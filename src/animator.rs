//! Animation seam between the controller and whatever drives presentation.

use std::time::Duration;

// =============================================================================
// Channels
// =============================================================================

/// A scalar the controller animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Ring-light intensity in `[0, 1]`.
    Intensity,
    /// Indicator opacity in `[0, 1]`.
    IndicatorOpacity,
    /// Indicator scale, 1.0 when fully shown.
    IndicatorScale,
}

impl Channel {
    /// All channels, in a fixed order.
    pub const ALL: [Channel; 3] = [
        Channel::Intensity,
        Channel::IndicatorOpacity,
        Channel::IndicatorScale,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Intensity => 0,
            Channel::IndicatorOpacity => 1,
            Channel::IndicatorScale => 2,
        }
    }
}

// =============================================================================
// Easing
// =============================================================================

/// Cubic easing curves for timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow finish.
    #[default]
    EaseOut,
    /// Slow start and finish.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` to eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; every curve is monotonic with
    /// `apply(0) == 0` and `apply(1) == 1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// =============================================================================
// Spring
// =============================================================================

/// Physical parameters for a damped spring transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring stiffness (k).
    pub stiffness: f32,
    /// Damping coefficient (c).
    pub damping: f32,
    /// Attached mass (m).
    pub mass: f32,
}

impl SpringConfig {
    /// Slightly underdamped preset with a small overshoot.
    pub const DEFAULT: SpringConfig = SpringConfig {
        stiffness: 180.0,
        damping: 18.0,
        mass: 1.0,
    };

    /// Displacement and velocity below which a spring counts as settled.
    pub const REST_TOLERANCE: f32 = 1e-3;
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Transition
// =============================================================================

/// How a channel should move to its new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Jump to the target on the next read.
    Immediate,
    /// Interpolate over a fixed duration.
    Timing {
        /// Total duration.
        duration: Duration,
        /// Curve applied to linear progress.
        easing: Easing,
    },
    /// Spring physics; the duration is whatever the spring needs to settle.
    Spring(SpringConfig),
}

impl Transition {
    /// A timed transition.
    pub fn timing(duration: Duration, easing: Easing) -> Self {
        Transition::Timing { duration, easing }
    }

    /// A spring transition with [`SpringConfig::DEFAULT`].
    pub fn spring() -> Self {
        Transition::Spring(SpringConfig::DEFAULT)
    }
}

// =============================================================================
// Animator Trait
// =============================================================================

/// Drives scalar channels toward targets.
///
/// The controller only issues requests and reads values back. Implementations
/// decide how and when values move: [`TweenAnimator`](crate::TweenAnimator)
/// steps them on frame ticks, [`InstantAnimator`](crate::InstantAnimator)
/// completes every request at once.
pub trait Animator {
    /// Start moving `channel` toward `target`, replacing any running motion.
    fn animate(&mut self, channel: Channel, target: f32, transition: Transition);

    /// The value currently presented for `channel`.
    fn value(&self, channel: Channel) -> f32;

    /// Whether any channel is still moving.
    fn is_animating(&self) -> bool;
}

impl<A: Animator + ?Sized> Animator for Box<A> {
    fn animate(&mut self, channel: Channel, target: f32, transition: Transition) {
        (**self).animate(channel, target, transition);
    }

    fn value(&self, channel: Channel) -> f32 {
        (**self).value(channel)
    }

    fn is_animating(&self) -> bool {
        (**self).is_animating()
    }
}
