//! Hyperparameter configurations for the supported classifier families.
//!
//! The catalog accepts exactly three families. Each one carries its own typed
//! parameter record, and the JSON form is tagged by `model_type`:
//!
//! ```json
//! { "model_type": "xgboost", "learning_rate": 0.02, "max_depth": 8 }
//! ```
//!
//! Fields left out of a request take the family defaults below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised when a hyperparameter value is outside its accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {family} hyperparameter `{field}`: {reason}")]
pub struct HyperparameterError {
    pub family: ModelType,
    pub field: &'static str,
    pub reason: String,
}

impl HyperparameterError {
    fn new(family: ModelType, field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            family,
            field,
            reason: reason.into(),
        }
    }
}

/// Discriminant of [`ModelFamily`], used for listings and storage paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    LightGbm,
    Xgboost,
    RandomForest,
}

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::LightGbm, ModelType::Xgboost, ModelType::RandomForest];

    /// Wire identifier, identical to the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::LightGbm => "light_gbm",
            ModelType::Xgboost => "xgboost",
            ModelType::RandomForest => "random_forest",
        }
    }

    /// Human-readable family name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::LightGbm => "LightGBM",
            ModelType::Xgboost => "XGBoost",
            ModelType::RandomForest => "Random Forest",
        }
    }

    pub fn default_params(&self) -> ModelFamily {
        match self {
            ModelType::LightGbm => ModelFamily::LightGbm(LightGbmParams::default()),
            ModelType::Xgboost => ModelFamily::Xgboost(XgboostParams::default()),
            ModelType::RandomForest => ModelFamily::RandomForest(RandomForestParams::default()),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gradient-boosted trees, LightGBM flavour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightGbmParams {
    pub random_state: u64,
    pub learning_rate: f64,
    pub n_estimators: u32,
    pub num_leaves: u32,
    /// `-1` means unlimited depth.
    pub max_depth: i32,
    pub feature_fraction: f64,
    pub lambda_l1: f64,
    pub lambda_l2: f64,
}

impl Default for LightGbmParams {
    fn default() -> Self {
        Self {
            random_state: 42,
            learning_rate: 0.05,
            n_estimators: 2000,
            num_leaves: 40,
            max_depth: -1,
            feature_fraction: 0.8,
            lambda_l1: 0.1,
            lambda_l2: 0.1,
        }
    }
}

/// Gradient-boosted trees, XGBoost flavour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XgboostParams {
    pub random_state: u64,
    pub learning_rate: f64,
    pub n_estimators: u32,
    pub max_depth: u32,
    pub subsample: f64,
    pub colsample_bytree: f64,
    pub reg_lambda: f64,
    pub reg_alpha: f64,
    pub objective: String,
    pub eval_metric: String,
}

impl Default for XgboostParams {
    fn default() -> Self {
        Self {
            random_state: 42,
            learning_rate: 0.02,
            n_estimators: 1000,
            max_depth: 8,
            subsample: 0.8,
            colsample_bytree: 0.8,
            reg_lambda: 1.0,
            reg_alpha: 0.1,
            objective: "binary:logistic".to_string(),
            eval_metric: "auc".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomForestParams {
    pub random_state: u64,
    pub n_estimators: u32,
    pub max_depth: u32,
    pub min_samples_leaf: u32,
    pub min_samples_split: u32,
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self {
            random_state: 42,
            n_estimators: 300,
            max_depth: 15,
            min_samples_leaf: 5,
            min_samples_split: 2,
        }
    }
}

/// A complete hyperparameter configuration for one classifier family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelFamily {
    LightGbm(LightGbmParams),
    Xgboost(XgboostParams),
    RandomForest(RandomForestParams),
}

impl Default for ModelFamily {
    fn default() -> Self {
        ModelFamily::LightGbm(LightGbmParams::default())
    }
}

impl ModelFamily {
    pub fn model_type(&self) -> ModelType {
        match self {
            ModelFamily::LightGbm(_) => ModelType::LightGbm,
            ModelFamily::Xgboost(_) => ModelType::Xgboost,
            ModelFamily::RandomForest(_) => ModelType::RandomForest,
        }
    }

    /// Check every field against the range the training backend accepts.
    pub fn validate(&self) -> Result<(), HyperparameterError> {
        let family = self.model_type();
        match self {
            ModelFamily::LightGbm(p) => {
                positive(family, "learning_rate", p.learning_rate)?;
                at_least(family, "n_estimators", p.n_estimators, 1)?;
                at_least(family, "num_leaves", p.num_leaves, 2)?;
                if p.max_depth == 0 || p.max_depth < -1 {
                    return Err(HyperparameterError::new(
                        family,
                        "max_depth",
                        format!("must be -1 (unlimited) or positive, got {}", p.max_depth),
                    ));
                }
                unit_fraction(family, "feature_fraction", p.feature_fraction)?;
                non_negative(family, "lambda_l1", p.lambda_l1)?;
                non_negative(family, "lambda_l2", p.lambda_l2)?;
            }
            ModelFamily::Xgboost(p) => {
                positive(family, "learning_rate", p.learning_rate)?;
                at_least(family, "n_estimators", p.n_estimators, 1)?;
                at_least(family, "max_depth", p.max_depth, 1)?;
                unit_fraction(family, "subsample", p.subsample)?;
                unit_fraction(family, "colsample_bytree", p.colsample_bytree)?;
                non_negative(family, "reg_lambda", p.reg_lambda)?;
                non_negative(family, "reg_alpha", p.reg_alpha)?;
                if p.objective.trim().is_empty() {
                    return Err(HyperparameterError::new(family, "objective", "must not be empty"));
                }
                if p.eval_metric.trim().is_empty() {
                    return Err(HyperparameterError::new(family, "eval_metric", "must not be empty"));
                }
            }
            ModelFamily::RandomForest(p) => {
                at_least(family, "n_estimators", p.n_estimators, 1)?;
                at_least(family, "max_depth", p.max_depth, 1)?;
                at_least(family, "min_samples_leaf", p.min_samples_leaf, 1)?;
                at_least(family, "min_samples_split", p.min_samples_split, 2)?;
            }
        }
        Ok(())
    }
}

fn positive(family: ModelType, field: &'static str, value: f64) -> Result<(), HyperparameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HyperparameterError::new(family, field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(
    family: ModelType,
    field: &'static str,
    value: f64,
) -> Result<(), HyperparameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HyperparameterError::new(family, field, format!("must be >= 0, got {}", value)))
    }
}

fn unit_fraction(
    family: ModelType,
    field: &'static str,
    value: f64,
) -> Result<(), HyperparameterError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(HyperparameterError::new(family, field, format!("must be in (0, 1], got {}", value)))
    }
}

fn at_least(
    family: ModelType,
    field: &'static str,
    value: u32,
    floor: u32,
) -> Result<(), HyperparameterError> {
    if value >= floor {
        Ok(())
    } else {
        Err(HyperparameterError::new(family, field, format!("must be >= {}, got {}", floor, value)))
    }
}
