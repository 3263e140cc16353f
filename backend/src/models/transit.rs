//! Transit geometry inputs and synthesized light-curve outputs.
//!
//! Every type here is an immutable value: built per call from caller input and
//! dropped once the caller has consumed it.

use qtty::{Day, Days, Hours, Minutes};
use serde::{Deserialize, Serialize};

/// Upper bound applied to the impact parameter before it shapes the ramp.
pub const MAX_IMPACT_PARAMETER: f64 = 1.1;

/// Default number of samples per orbital period.
pub const DEFAULT_POINT_COUNT: usize = 1000;

fn default_point_count() -> usize {
    DEFAULT_POINT_COUNT
}

fn default_period_count() -> usize {
    1
}

/// Orbital and transit parameters driving the shape generator.
///
/// Values are taken as given; the generator clamps degenerate inputs
/// (non-positive period or duration, out-of-range impact) instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitParameters {
    /// Orbital period.
    #[serde(rename = "period_days")]
    pub period: Days,
    /// Total transit duration, first to fourth contact.
    #[serde(rename = "duration_hours")]
    pub duration: Hours,
    /// Mid-transit depth in parts per million.
    pub depth_ppm: f64,
    /// Normalized impact parameter, clamped to `[0, 1.1]` when used.
    #[serde(default)]
    pub impact_parameter: f64,
    /// Time of a reference transit center. `None` centers the first transit
    /// on the middle of the time axis.
    #[serde(default, rename = "epoch_days")]
    pub epoch_reference: Option<Days>,
    /// Samples per orbital period.
    #[serde(default = "default_point_count")]
    pub point_count: usize,
    /// Number of orbital periods spanned by the time axis.
    #[serde(default = "default_period_count")]
    pub period_count: usize,
}

impl TransitParameters {
    pub fn new(period: Days, duration: Hours, depth_ppm: f64, impact_parameter: f64) -> Self {
        Self {
            period,
            duration,
            depth_ppm,
            impact_parameter,
            epoch_reference: None,
            point_count: DEFAULT_POINT_COUNT,
            period_count: 1,
        }
    }

    pub fn with_epoch(mut self, epoch: Days) -> Self {
        self.epoch_reference = Some(epoch);
        self
    }

    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_period_count(mut self, period_count: usize) -> Self {
        self.period_count = period_count;
        self
    }

    /// Transit depth as a fraction of the baseline flux. Negative depths read as zero.
    pub fn depth_fraction(&self) -> f64 {
        self.depth_ppm.max(0.0) / 1e6
    }

    /// Impact parameter restricted to `[0, MAX_IMPACT_PARAMETER]`. NaN reads as zero.
    pub fn clamped_impact(&self) -> f64 {
        if self.impact_parameter.is_nan() {
            return 0.0;
        }
        self.impact_parameter.clamp(0.0, MAX_IMPACT_PARAMETER)
    }

    /// Transit duration expressed on the time axis (days).
    pub fn duration_days(&self) -> f64 {
        self.duration.to::<Day>().value()
    }

    /// Number of samples the generator produces: `point_count × period_count`,
    /// with `point_count ≥ 2` and `period_count ≥ 1` enforced.
    pub fn sample_count(&self) -> usize {
        self.point_count.max(2).saturating_mul(self.period_count.max(1))
    }
}

/// Selects what the `x` axis of a generated curve represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Absolute time in days.
    #[default]
    Time,
    /// Orbital phase in periods relative to the reference epoch.
    Phase,
}

/// Ordered `(x, flux)` series produced by the shape generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightCurveSample {
    mode: OutputMode,
    x: Vec<f64>,
    flux: Vec<f64>,
}

impl LightCurveSample {
    pub(crate) fn new(mode: OutputMode, x: Vec<f64>, flux: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), flux.len());
        Self { mode, x, flux }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }

    /// Iterate over `(x, flux)` pairs in axis order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.flux.iter().copied())
    }

    /// Smallest flux value and the index of its first occurrence.
    pub fn min_flux(&self) -> Option<(usize, f64)> {
        self.flux
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, f)| match best {
                Some((_, b)) if b <= f => best,
                _ => Some((i, f)),
            })
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.flux)
    }
}

/// Observation assumptions behind the SNR-to-sigma conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnrSettings {
    /// Sampling cadence of the photometry.
    #[serde(rename = "cadence_minutes")]
    pub cadence: Minutes,
    /// Length of the observing campaign.
    #[serde(rename = "observation_window_days")]
    pub observation_window: Days,
    /// Fraction of the window actually on target.
    pub duty_cycle: f64,
}

impl Default for SnrSettings {
    fn default() -> Self {
        Self {
            cadence: Minutes::new(30.0),
            observation_window: Days::new(1320.0),
            duty_cycle: 0.9,
        }
    }
}

/// Per-sample noise amplitude and the in-transit counts it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    pub sigma: f64,
    pub in_transit_points_per_transit: u64,
    pub transit_count: u64,
    pub total_in_transit_points: u64,
}

/// Deterministic sinusoidal perturbation added on top of white noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedNoise {
    pub amplitude: f64,
    pub period_samples: f64,
}
