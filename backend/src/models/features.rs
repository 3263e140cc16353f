//! Candidate features submitted for classification and the form profiles
//! that describe them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one input field of a candidate form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
}

impl FieldSpec {
    fn bounded(key: &str, label: &str, min: f64, max: f64, decimals: u32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            min: Some(min),
            max: Some(max),
            decimals: Some(decimals),
        }
    }

    /// Both bounds present and ordered.
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo <= hi => Some((lo, hi)),
            _ => None,
        }
    }
}

/// Name of the default profile, the Kepler Objects of Interest columns.
pub const KEPLER_PROFILE: &str = "kepler";

/// The eleven KOI columns the base classifier was trained on.
pub fn kepler_profile() -> Vec<FieldSpec> {
    vec![
        FieldSpec::bounded("koi_period", "Period (days)", 0.2, 1000.0, 3),
        FieldSpec::bounded("koi_time0bk", "Transit epoch (BKJD)", 0.0, 1500.0, 5),
        FieldSpec::bounded("koi_impact", "Impact parameter", 0.0, 1.1, 3),
        FieldSpec::bounded("koi_duration", "Duration (hrs)", 0.5, 30.0, 2),
        FieldSpec::bounded("koi_depth", "Depth (ppm)", 20.0, 30000.0, 0),
        FieldSpec::bounded("koi_prad", "Planet radius (R⊕)", 0.3, 20.0, 3),
        FieldSpec::bounded("koi_teq", "Equilibrium temperature (K)", 100.0, 3500.0, 0),
        FieldSpec::bounded("koi_insol", "Insolation flux (S⊕)", 0.01, 5000.0, 2),
        FieldSpec::bounded("koi_model_snr", "Signal-to-noise ratio", 5.0, 1000.0, 2),
        FieldSpec::bounded("koi_steff", "Stellar effective temperature (K)", 3000.0, 7500.0, 0),
        FieldSpec::bounded("koi_srad", "Stellar radius (R☉)", 0.2, 3.0, 3),
    ]
}

/// All known profiles keyed by name.
pub fn profiles() -> BTreeMap<String, Vec<FieldSpec>> {
    let mut map = BTreeMap::new();
    map.insert(KEPLER_PROFILE.to_string(), kepler_profile());
    map
}

/// Feature values for one candidate. Missing or unparseable inputs are `None`
/// and are forwarded as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateFeatures(pub BTreeMap<String, Option<f64>>);

impl CandidateFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<f64>) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Profile keys that have no value in this candidate.
    pub fn missing_keys<'a>(&self, profile: &'a [FieldSpec]) -> Vec<&'a str> {
        profile
            .iter()
            .filter(|spec| self.get(&spec.key).is_none())
            .map(|spec| spec.key.as_str())
            .collect()
    }
}
