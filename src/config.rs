//! Tunables for the intensity controller and the overlay.

use crate::animator::{Easing, SpringConfig};
use crate::error::ConfigError;

use std::time::Duration;

/// Auto-hide delays keyed on the settled intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelays {
    /// Delay after settling fully off.
    pub off: Duration,
    /// Delay after settling at full brightness.
    pub full: Duration,
    /// Delay after settling anywhere in between.
    pub partial: Duration,
}

impl HideDelays {
    /// Pick the delay for a settled target.
    ///
    /// Exact comparison is intended: after snapping, fully off and fully on
    /// are always exactly `0.0` and `1.0`.
    pub fn for_target(&self, target: f32) -> Duration {
        if target == 0.0 {
            self.off
        } else if target == 1.0 {
            self.full
        } else {
            self.partial
        }
    }
}

impl Default for HideDelays {
    fn default() -> Self {
        Self {
            off: Duration::from_millis(250),
            full: Duration::from_millis(500),
            partial: Duration::from_millis(1000),
        }
    }
}

/// Every tunable of the ring-light controller and its overlay.
///
/// Use [`RingLightConfig::validate`] before handing a hand-built config to
/// anything; [`IntensityController::with_config`](crate::IntensityController::with_config)
/// does so itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RingLightConfig {
    /// Fraction of the interaction width that maps to a full ±1 intensity change.
    pub reference_span_fraction: f32,
    /// Settle targets below this snap to 0.
    pub snap_off_below: f32,
    /// Settle targets above this snap to 1.
    pub snap_full_above: f32,
    /// Duration of the post-release intensity animation.
    pub settle_duration: Duration,
    /// Curve of the post-release intensity animation.
    pub settle_easing: Easing,
    /// Auto-hide delays.
    pub hide_delays: HideDelays,
    /// Duration of the indicator fade-out.
    pub hide_duration: Duration,
    /// Indicator scale once hidden.
    pub hidden_scale: f32,
    /// Spring used to pop the indicator in.
    pub indicator_spring: SpringConfig,
    /// Maximum edge band thickness as a fraction of the surface dimension.
    pub edge_coverage: f32,
    /// Maximum corner glow side as a fraction of the shorter surface side.
    pub corner_coverage: f32,
}

impl Default for RingLightConfig {
    fn default() -> Self {
        Self {
            reference_span_fraction: 0.5,
            snap_off_below: 0.1,
            snap_full_above: 0.9,
            settle_duration: Duration::from_millis(300),
            settle_easing: Easing::EaseOut,
            hide_delays: HideDelays::default(),
            hide_duration: Duration::from_millis(200),
            hidden_scale: 0.8,
            indicator_spring: SpringConfig::DEFAULT,
            edge_coverage: 0.12,
            corner_coverage: 0.35,
        }
    }
}

impl RingLightConfig {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("reference_span_fraction", self.reference_span_fraction)?;
        check_unit("snap_off_below", self.snap_off_below)?;
        check_unit("snap_full_above", self.snap_full_above)?;
        check_unit("hidden_scale", self.hidden_scale)?;
        check_fraction("edge_coverage", self.edge_coverage)?;
        check_fraction("corner_coverage", self.corner_coverage)?;
        check_spring(&self.indicator_spring)?;

        if self.snap_off_below > self.snap_full_above {
            return Err(ConfigError::InvalidThresholds {
                snap_off: self.snap_off_below,
                snap_full: self.snap_full_above,
            });
        }
        Ok(())
    }

    /// Apply the deadzone and full-zone snap to a raw settle target.
    pub fn snap(&self, raw: f32) -> f32 {
        if raw < self.snap_off_below {
            0.0
        } else if raw > self.snap_full_above {
            1.0
        } else {
            raw
        }
    }
}

// Closed range [0, 1].
fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}

// Half-open range (0, 1].
fn check_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}

// Stiffness and mass strictly positive, damping non-negative, all finite.
fn check_spring(spring: &SpringConfig) -> Result<(), ConfigError> {
    let checks = [
        ("indicator_spring.stiffness", spring.stiffness, spring.stiffness > 0.0),
        ("indicator_spring.damping", spring.damping, spring.damping >= 0.0),
        ("indicator_spring.mass", spring.mass, spring.mass > 0.0),
    ];
    for (field, value, in_range) in checks {
        if !(in_range && value.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field,
                value,
                min: 0.0,
                max: f32::INFINITY,
            });
        }
    }
    Ok(())
}
