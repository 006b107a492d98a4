//! Frame-driven reference animator.

use crate::animator::{Animator, Channel, Easing, SpringConfig, Transition};

use log::trace;
use std::time::{Duration, Instant};

/// Fixed integration step for springs (240 Hz).
const SPRING_STEP_SECS: f32 = 1.0 / 240.0;

/// Longest gap between two frames that a spring integrates in one go.
/// Anything longer (a stalled event loop) is treated as this.
const MAX_FRAME_GAP: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
enum Motion {
    Timing {
        from: f32,
        to: f32,
        // Set on the first frame after the request.
        started: Option<Instant>,
        duration: Duration,
        easing: Easing,
    },
    Spring {
        to: f32,
        config: SpringConfig,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct Track {
    value: f32,
    velocity: f32,
    motion: Option<Motion>,
}

impl Track {
    fn step(&mut self, now: Instant, dt: Duration) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };

        match motion {
            Motion::Timing {
                from,
                to,
                started,
                duration,
                easing,
            } => {
                let started = *started.get_or_insert(now);
                let elapsed = now.saturating_duration_since(started);
                let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
                if progress >= 1.0 {
                    self.value = *to;
                    self.motion = None;
                } else {
                    self.value = *from + (*to - *from) * easing.apply(progress);
                }
                self.velocity = 0.0;
            }
            Motion::Spring { to, config } => {
                let to = *to;
                let config = *config;
                let mut remaining = dt.min(MAX_FRAME_GAP).as_secs_f32();
                while remaining > 0.0 {
                    let h = remaining.min(SPRING_STEP_SECS);
                    let force =
                        -config.stiffness * (self.value - to) - config.damping * self.velocity;
                    self.velocity += force / config.mass * h;
                    self.value += self.velocity * h;
                    remaining -= h;
                }

                if (self.value - to).abs() < SpringConfig::REST_TOLERANCE
                    && self.velocity.abs() < SpringConfig::REST_TOLERANCE
                {
                    self.value = to;
                    self.velocity = 0.0;
                    self.motion = None;
                }
            }
        }
    }
}

/// Steps every [`Channel`] on frame ticks.
///
/// Call [`TweenAnimator::advance`] once per rendered frame. Timed motions
/// start on the first frame after they are requested; springs integrate the
/// time between frames.
///
/// ```
/// use ringlight_core::{Animator, Channel, Easing, Transition, TweenAnimator};
/// use std::time::{Duration, Instant};
///
/// let t0 = Instant::now();
/// let mut animator = TweenAnimator::new();
/// animator.animate(
///     Channel::Intensity,
///     1.0,
///     Transition::timing(Duration::from_millis(300), Easing::Linear),
/// );
/// animator.advance(t0);
/// animator.advance(t0 + Duration::from_millis(150));
/// assert!((animator.value(Channel::Intensity) - 0.5).abs() < 1e-3);
/// ```
#[derive(Debug, Default)]
pub struct TweenAnimator {
    tracks: [Track; 3],
    last_frame: Option<Instant>,
}

impl TweenAnimator {
    /// Create an animator with every channel at rest at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step all channels to `now`.
    pub fn advance(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);

        for track in &mut self.tracks {
            track.step(now, dt);
        }
    }
}

impl Animator for TweenAnimator {
    fn animate(&mut self, channel: Channel, target: f32, transition: Transition) {
        trace!("animate {:?} -> {} ({:?})", channel, target, transition);
        let track = &mut self.tracks[channel.index()];

        match transition {
            Transition::Immediate => {
                track.value = target;
                track.velocity = 0.0;
                track.motion = None;
            }
            Transition::Timing { duration, .. } if duration.is_zero() => {
                track.value = target;
                track.velocity = 0.0;
                track.motion = None;
            }
            Transition::Timing { duration, easing } => {
                track.motion = Some(Motion::Timing {
                    from: track.value,
                    to: target,
                    started: None,
                    duration,
                    easing,
                });
            }
            Transition::Spring(config) => {
                // Current velocity carries over into the new spring.
                track.motion = Some(Motion::Spring { to: target, config });
            }
        }
    }

    fn value(&self, channel: Channel) -> f32 {
        self.tracks[channel.index()].value
    }

    fn is_animating(&self) -> bool {
        self.tracks.iter().any(|track| track.motion.is_some())
    }
}
