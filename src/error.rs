//! Error types for the ring-light controller.

/// Errors raised while validating a [`RingLightConfig`](crate::RingLightConfig)
/// or changing the reference span at runtime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A tunable was outside its valid range.
    #[error("Invalid value {value} for {field} (expected {min}-{max})")]
    OutOfRange {
        /// The config field name.
        field: &'static str,
        /// The invalid value provided.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// The off-snap threshold sits above the full-snap threshold.
    #[error("Snap thresholds overlap (off below {snap_off}, full above {snap_full})")]
    InvalidThresholds {
        /// Settle targets below this snap to 0.
        snap_off: f32,
        /// Settle targets above this snap to 1.
        snap_full: f32,
    },

    /// The reference span or interaction width was zero, negative or not finite.
    #[error("Invalid reference span: {0}")]
    InvalidSpan(f32),
}

/// Errors raised when gesture events arrive out of order.
///
/// The controller ignores the offending event and leaves its state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    /// An update or end arrived without a preceding start.
    #[error("No gesture in progress")]
    NoActiveGesture,

    /// A start arrived while a gesture was already in progress.
    #[error("Gesture already in progress - sessions cannot overlap")]
    AlreadyDragging,
}
