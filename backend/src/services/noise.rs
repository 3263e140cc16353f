//! Noise amplitude estimation and injection.
//!
//! [`sigma_from_snr`] answers "how noisy may each sample be so that the whole
//! observing campaign reaches the requested SNR on this transit?". Averaging
//! over `N` in-transit samples improves the SNR by `sqrt(N)`, so the per-sample
//! sigma is `depth × sqrt(N) / snr`.
//!
//! The injectors return fresh vectors and leave their input untouched.

use qtty::{Day, Days, Hours, Minute};
use rand::Rng;
use std::f64::consts::PI;

use crate::models::{NoiseModel, RedNoise, SnrSettings};

/// Floor applied to the SNR before dividing by it.
pub const SNR_EPSILON: f64 = 1e-6;
/// Floor applied to periods and cadences before dividing by them.
pub const TIME_EPSILON: f64 = 1e-9;

/// Derive the per-sample Gaussian sigma that yields `snr` over the whole
/// observation window.
///
/// Never fails: a non-positive SNR is floored at [`SNR_EPSILON`], and counts
/// are floored at one.
pub fn sigma_from_snr(
    depth_ppm: f64,
    snr: f64,
    duration: Hours,
    period: Days,
    settings: &SnrSettings,
) -> NoiseModel {
    let depth_fraction = depth_ppm.max(0.0) / 1e6;

    let cadence_minutes = settings.cadence.value().max(TIME_EPSILON);
    let duration_minutes = duration.to::<Minute>().value();
    let in_transit_points_per_transit = floor_count(duration_minutes / cadence_minutes);

    let period_days = period.to::<Day>().value().max(TIME_EPSILON);
    let usable_days = settings.observation_window.value() * settings.duty_cycle;
    let transit_count = floor_count(usable_days / period_days);

    let total_in_transit_points = in_transit_points_per_transit
        .saturating_mul(transit_count)
        .max(1);

    let sigma = depth_fraction * (total_in_transit_points as f64).sqrt() / snr.max(SNR_EPSILON);

    NoiseModel {
        sigma,
        in_transit_points_per_transit,
        transit_count,
        total_in_transit_points,
    }
}

/// `max(1, floor(value))` as a count. NaN and negative values give one.
fn floor_count(value: f64) -> u64 {
    // `as` saturates: NaN -> 0, +inf -> u64::MAX.
    (value.floor() as u64).max(1)
}

/// Uniform variate in the open interval `(0, 1)`. Zero is rejected so the
/// logarithm in Box–Muller stays finite.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// One standard normal deviate via the Box–Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Add independent Gaussian noise of standard deviation `sigma` to each sample.
///
/// The random source is injected so callers can pass a seeded generator for
/// reproducible output. A non-finite or non-positive `sigma` returns a copy.
pub fn add_gaussian_noise<R: Rng + ?Sized>(samples: &[f64], sigma: f64, rng: &mut R) -> Vec<f64> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return samples.to_vec();
    }
    samples
        .iter()
        .map(|&s| s + standard_normal(rng) * sigma)
        .collect()
}

/// [`add_gaussian_noise`] drawing from the thread-local generator.
pub fn add_gaussian_noise_default(samples: &[f64], sigma: f64) -> Vec<f64> {
    add_gaussian_noise(samples, sigma, &mut rand::thread_rng())
}

/// Add `amplitude × sin(2π i / period_samples)` to sample `i`.
///
/// No-op when the amplitude is not positive or the period is not a finite
/// number greater than one sample.
pub fn add_red_noise(samples: &[f64], red: &RedNoise) -> Vec<f64> {
    let RedNoise {
        amplitude,
        period_samples,
    } = *red;
    if amplitude.is_nan() || amplitude <= 0.0 || !period_samples.is_finite() || period_samples <= 1.0 {
        return samples.to_vec();
    }
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| s + amplitude * (2.0 * PI * i as f64 / period_samples).sin())
        .collect()
}
