//! Instant animator for testing.

use crate::animator::{Animator, Channel, Transition};

/// One call to [`Animator::animate`], as recorded by [`InstantAnimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    /// The channel that was animated.
    pub channel: Channel,
    /// The requested target.
    pub target: f32,
    /// The requested transition.
    pub transition: Transition,
}

/// An animator that completes every request at once.
///
/// This allows testing code that depends on [`Animator`] without a frame
/// loop. Every request is kept in [`InstantAnimator::history`] so tests can
/// assert which transitions were issued.
///
/// # Example
///
/// ```
/// use ringlight_core::{Animator, Channel, InstantAnimator, Transition};
///
/// let mut animator = InstantAnimator::new();
/// animator.animate(Channel::Intensity, 0.7, Transition::spring());
/// assert_eq!(animator.value(Channel::Intensity), 0.7);
/// assert_eq!(animator.history().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InstantAnimator {
    values: [f32; 3],
    history: Vec<AnimationRequest>,
}

impl InstantAnimator {
    /// Create an instant animator with every channel at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request seen so far, oldest first.
    pub fn history(&self) -> &[AnimationRequest] {
        &self.history
    }

    /// Requests seen so far for one channel.
    pub fn requests_for(&self, channel: Channel) -> impl Iterator<Item = &AnimationRequest> {
        self.history.iter().filter(move |req| req.channel == channel)
    }

    /// The most recent request for `channel`.
    pub fn last_request(&self, channel: Channel) -> Option<&AnimationRequest> {
        self.requests_for(channel).last()
    }

    /// Forget recorded requests, keeping current values.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Animator for InstantAnimator {
    fn animate(&mut self, channel: Channel, target: f32, transition: Transition) {
        self.values[channel.index()] = target;
        self.history.push(AnimationRequest {
            channel,
            target,
            transition,
        });
    }

    fn value(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    fn is_animating(&self) -> bool {
        false
    }
}
