//! Trapezoidal transit light-curve generator.
//!
//! The transit is modelled as a flat-bottomed dip with linear ingress and
//! egress. The ramp length grows with the impact parameter: grazing transits
//! spend a larger share of their duration on the limb.
//!
//! ```text
//!  1.0 ─────────╲                 ╱─────────
//!                ╲               ╱
//!  1 - depth      ╲_____________╱
//!               |ramp|  flat   |ramp|
//! ```
//!
//! Degenerate inputs never fail: periods and ramps are floored at small
//! epsilons before division, and the impact parameter is clamped.

use crate::models::{LightCurveSample, OutputMode, TransitParameters};

/// Smallest period accepted as a divisor (days).
pub const PERIOD_EPSILON: f64 = 1e-9;
/// Smallest ramp accepted as a divisor (days).
pub const RAMP_EPSILON: f64 = 1e-12;

const MIN_RAMP_FRACTION: f64 = 0.1;
const MAX_RAMP_FRACTION: f64 = 0.4;
const RAMP_FRACTION_PER_IMPACT: f64 = 0.3;

/// Derived trapezoid geometry, all lengths in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitShape {
    pub depth_fraction: f64,
    pub duration: f64,
    /// Length of each of ingress and egress.
    pub ramp: f64,
    /// Length of the flat bottom. Always `duration - 2 * ramp`, never negative.
    pub flat: f64,
}

impl TransitShape {
    pub fn from_params(params: &TransitParameters) -> Self {
        // f64::max discards NaN, so a NaN duration collapses to zero.
        let duration = params.duration_days().max(0.0);
        let ramp_fraction = (MIN_RAMP_FRACTION
            + RAMP_FRACTION_PER_IMPACT * params.clamped_impact())
        .clamp(MIN_RAMP_FRACTION, MAX_RAMP_FRACTION);
        let ramp = 0.5 * duration * ramp_fraction;
        let flat = (duration - 2.0 * ramp).max(0.0);

        Self {
            depth_fraction: params.depth_fraction(),
            duration,
            ramp,
            flat,
        }
    }

    /// Normalized flux at `offset` days from the nearest transit center.
    pub fn flux_at_offset(&self, offset: f64) -> f64 {
        let x = offset.abs();
        let half_flat = self.flat / 2.0;

        if x <= half_flat {
            1.0 - self.depth_fraction
        } else if x <= half_flat + self.ramp {
            let progress = (x - half_flat) / self.ramp.max(RAMP_EPSILON);
            1.0 - self.depth_fraction * (1.0 - progress)
        } else {
            1.0
        }
    }
}

/// Signed distance from `t` to the nearest transit center, in `[-P/2, P/2)`.
pub fn phase_offset(t: f64, epoch: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    (t - epoch + half).rem_euclid(period) - half
}

/// Generate a noiseless light curve for `params`.
///
/// The time axis holds `point_count × period_count` uniformly spaced samples
/// spanning `period × period_count` days, centered on the reference epoch (zero
/// when none is given), so the first transit center falls on the midpoint index.
pub fn generate(params: &TransitParameters, mode: OutputMode) -> LightCurveSample {
    let period = params.period.value().max(PERIOD_EPSILON);
    let epoch = params
        .epoch_reference
        .map(|e| e.value())
        .filter(|e| e.is_finite())
        .unwrap_or(0.0);
    let n = params.sample_count();
    let span = period * params.period_count.max(1) as f64;
    let shape = TransitShape::from_params(params);

    let mut x = Vec::with_capacity(n);
    let mut flux = Vec::with_capacity(n);

    for i in 0..n {
        let t = (i as f64 / n as f64) * span - span / 2.0 + epoch;
        flux.push(shape.flux_at_offset(phase_offset(t, epoch, period)));
        x.push(match mode {
            OutputMode::Time => t,
            OutputMode::Phase => (t - epoch) / period,
        });
    }

    LightCurveSample::new(mode, x, flux)
}
