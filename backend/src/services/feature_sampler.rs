//! Random candidate generation for filling the input form.

use rand::Rng;

use crate::models::{CandidateFeatures, FieldSpec};

const UNBOUNDED_MAX: f64 = 100.0;
const UNBOUNDED_DECIMALS: u32 = 2;

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Draw one value for `spec`: uniform in `[min, max]` rounded to the field's
/// decimals, or uniform in `[0, 100)` with two decimals when unbounded.
pub fn sample_value<R: Rng + ?Sized>(spec: &FieldSpec, rng: &mut R) -> f64 {
    match spec.range() {
        Some((lo, hi)) => {
            let decimals = spec.decimals.unwrap_or(UNBOUNDED_DECIMALS);
            let raw = lo + rng.gen::<f64>() * (hi - lo);
            round_to(raw, decimals).clamp(lo, hi)
        }
        None => round_to(rng.gen::<f64>() * UNBOUNDED_MAX, UNBOUNDED_DECIMALS),
    }
}

/// Draw a full candidate for `profile`.
pub fn sample_candidate<R: Rng + ?Sized>(profile: &[FieldSpec], rng: &mut R) -> CandidateFeatures {
    let mut features = CandidateFeatures::new();
    for spec in profile {
        features.insert(spec.key.clone(), Some(sample_value(spec, rng)));
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::features::kepler_profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(1234.5678, 0), 1235.0);
    }

    #[test]
    fn test_samples_respect_bounds_and_decimals() {
        let profile = kepler_profile();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let candidate = sample_candidate(&profile, &mut rng);
            assert_eq!(candidate.len(), profile.len());
            for spec in &profile {
                let value = candidate.get(&spec.key).unwrap();
                let (lo, hi) = spec.range().unwrap();
                assert!(value >= lo && value <= hi, "{} = {}", spec.key, value);
                let decimals = spec.decimals.unwrap();
                assert!((round_to(value, decimals) - value).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_unbounded_field_uses_default_range() {
        let spec = FieldSpec {
            key: "free".to_string(),
            label: "Free".to_string(),
            min: None,
            max: None,
            decimals: None,
        };
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let v = sample_value(&spec, &mut rng);
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_candidate() {
        let profile = kepler_profile();
        let a = sample_candidate(&profile, &mut StdRng::seed_from_u64(11));
        let b = sample_candidate(&profile, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
