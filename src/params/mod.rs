//! The user-editable parameter set covering scale, train and predict
//!
//! Numeric training fields are kept as the text the user typed. They are
//! only interpreted by [`crate::validation::validate`], which knows which
//! fields matter for the selected SVM and kernel type.

pub mod class_weights;
pub mod scale;

pub use self::class_weights::*;
pub use self::scale::*;

use crate::core::{FieldId, KernelType, SvmType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEGREE: i32 = 3;
pub const DEFAULT_COEF0: f64 = 0.0;
pub const DEFAULT_COST: f64 = 1.0;
pub const DEFAULT_NU: f64 = 0.5;
pub const DEFAULT_EPSILON_LOSS: f64 = 0.1;
pub const DEFAULT_EPSILON_TOLERANCE: f64 = 0.001;
pub const DEFAULT_CACHE_SIZE_MB: f64 = 100.0;

/// Everything the user can set across the three operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub svm_type: SvmType,
    pub kernel_type: KernelType,

    pub degree: String,
    /// Blank means "toolkit default", i.e. 1/num_features
    pub gamma: String,
    pub coef0: String,
    pub cost: String,
    pub nu: String,
    pub epsilon_loss: String,
    pub epsilon_tolerance: String,
    pub cache_size_mb: String,
    /// Blank means no cross validation
    pub cross_validation_folds: String,

    pub shrinking: bool,
    pub probability_estimates: bool,
    pub class_weights: ClassWeights,

    pub data_file_path: String,
    /// May be blank for training, in which case the toolkit names the model
    pub model_file_path: String,
    /// Prediction output
    pub output_file_path: String,
    /// `-b` for prediction, independent of the training flag
    pub predict_probability: bool,

    pub scale: ScaleRequest,
    /// Destination of `svm-scale` output
    pub scaled_file_path: String,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            svm_type: SvmType::CSvc,
            kernel_type: KernelType::Rbf,
            degree: DEFAULT_DEGREE.to_string(),
            gamma: String::new(),
            coef0: DEFAULT_COEF0.to_string(),
            cost: DEFAULT_COST.to_string(),
            nu: DEFAULT_NU.to_string(),
            epsilon_loss: DEFAULT_EPSILON_LOSS.to_string(),
            epsilon_tolerance: DEFAULT_EPSILON_TOLERANCE.to_string(),
            cache_size_mb: DEFAULT_CACHE_SIZE_MB.to_string(),
            cross_validation_folds: String::new(),
            shrinking: true,
            probability_estimates: false,
            class_weights: ClassWeights::new(),
            data_file_path: String::new(),
            model_file_path: String::new(),
            output_file_path: String::new(),
            predict_probability: false,
            scale: ScaleRequest::default(),
            scaled_file_path: String::new(),
        }
    }
}

impl ParameterSet {
    /// Create a parameter set holding the toolkit defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every training option to its default.
    /// File paths and the scale section are left alone.
    pub fn reset_options(&mut self) {
        let defaults = Self::default();
        self.svm_type = defaults.svm_type;
        self.kernel_type = defaults.kernel_type;
        self.degree = defaults.degree;
        self.gamma = defaults.gamma;
        self.coef0 = defaults.coef0;
        self.cost = defaults.cost;
        self.nu = defaults.nu;
        self.epsilon_loss = defaults.epsilon_loss;
        self.epsilon_tolerance = defaults.epsilon_tolerance;
        self.cache_size_mb = defaults.cache_size_mb;
        self.cross_validation_folds = defaults.cross_validation_folds;
        self.shrinking = defaults.shrinking;
        self.probability_estimates = defaults.probability_estimates;
        self.class_weights = defaults.class_weights;
    }

    /// Restore the scale section to its default
    pub fn reset_scale(&mut self) {
        self.scale = ScaleRequest::default();
    }

    /// Raw text of a numeric field, `None` for non-text fields
    pub fn text(&self, field: FieldId) -> Option<&str> {
        let text = match field {
            FieldId::Degree => &self.degree,
            FieldId::Gamma => &self.gamma,
            FieldId::Coef0 => &self.coef0,
            FieldId::Cost => &self.cost,
            FieldId::Nu => &self.nu,
            FieldId::EpsilonLoss => &self.epsilon_loss,
            FieldId::EpsilonTolerance => &self.epsilon_tolerance,
            FieldId::CacheSize => &self.cache_size_mb,
            FieldId::CrossValidationFolds => &self.cross_validation_folds,
            FieldId::Shrinking | FieldId::ProbabilityEstimates | FieldId::ClassWeights => {
                return None
            }
        };
        Some(text.as_str())
    }

    /// Mutable access to the raw text of a numeric field
    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Degree => Some(&mut self.degree),
            FieldId::Gamma => Some(&mut self.gamma),
            FieldId::Coef0 => Some(&mut self.coef0),
            FieldId::Cost => Some(&mut self.cost),
            FieldId::Nu => Some(&mut self.nu),
            FieldId::EpsilonLoss => Some(&mut self.epsilon_loss),
            FieldId::EpsilonTolerance => Some(&mut self.epsilon_tolerance),
            FieldId::CacheSize => Some(&mut self.cache_size_mb),
            FieldId::CrossValidationFolds => Some(&mut self.cross_validation_folds),
            FieldId::Shrinking | FieldId::ProbabilityEstimates | FieldId::ClassWeights => None,
        }
    }

    pub fn with_svm_type(mut self, svm_type: SvmType) -> Self {
        self.svm_type = svm_type;
        self
    }

    pub fn with_kernel_type(mut self, kernel_type: KernelType) -> Self {
        self.kernel_type = kernel_type;
        self
    }

    /// Set the text of a numeric field; non-text fields are ignored
    pub fn with_text<S: Into<String>>(mut self, field: FieldId, text: S) -> Self {
        if let Some(slot) = self.text_mut(field) {
            *slot = text.into();
        }
        self
    }

    pub fn with_gamma(mut self, gamma: Option<f64>) -> Self {
        self.gamma = gamma.map(|g| g.to_string()).unwrap_or_default();
        self
    }

    pub fn with_class_weight(mut self, label: i32, weight: f64) -> Self {
        self.class_weights.insert(label, weight);
        self
    }

    pub fn with_data_file<S: Into<String>>(mut self, path: S) -> Self {
        self.data_file_path = path.into();
        self
    }

    pub fn with_model_file<S: Into<String>>(mut self, path: S) -> Self {
        self.model_file_path = path.into();
        self
    }

    pub fn with_output_file<S: Into<String>>(mut self, path: S) -> Self {
        self.output_file_path = path.into();
        self
    }

    pub fn with_scaled_file<S: Into<String>>(mut self, path: S) -> Self {
        self.scaled_file_path = path.into();
        self
    }

    pub fn with_scale(mut self, scale: ScaleRequest) -> Self {
        self.scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ParameterSet::default();
        assert_eq!(params.svm_type, SvmType::CSvc);
        assert_eq!(params.kernel_type, KernelType::Rbf);
        assert_eq!(params.degree, "3");
        assert_eq!(params.gamma, "");
        assert_eq!(params.coef0, "0");
        assert_eq!(params.cost, "1");
        assert_eq!(params.nu, "0.5");
        assert_eq!(params.epsilon_loss, "0.1");
        assert_eq!(params.epsilon_tolerance, "0.001");
        assert_eq!(params.cache_size_mb, "100");
        assert_eq!(params.cross_validation_folds, "");
        assert!(params.shrinking);
        assert!(!params.probability_estimates);
        assert!(params.class_weights.is_empty());
    }

    #[test]
    fn test_changing_type_keeps_values() {
        let params = ParameterSet::new()
            .with_text(FieldId::Degree, "5")
            .with_kernel_type(KernelType::Linear)
            .with_kernel_type(KernelType::Polynomial);
        assert_eq!(params.degree, "5");
    }

    #[test]
    fn test_reset_options_keeps_paths_and_scale() {
        let mut params = ParameterSet::new()
            .with_svm_type(SvmType::NuSvr)
            .with_text(FieldId::Nu, "0.2")
            .with_class_weight(1, 2.0)
            .with_data_file("train.dat")
            .with_scale(ScaleRequest::new().with_x_bounds(0.0, 1.0));

        params.reset_options();

        assert_eq!(params.svm_type, SvmType::CSvc);
        assert_eq!(params.nu, "0.5");
        assert!(params.class_weights.is_empty());
        assert_eq!(params.data_file_path, "train.dat");
        assert_eq!(params.scale.x_lower, 0.0);

        params.reset_scale();
        assert_eq!(params.scale, ScaleRequest::default());
    }

    #[test]
    fn test_text_access() {
        let mut params = ParameterSet::new();
        assert_eq!(params.text(FieldId::Cost), Some("1"));
        assert_eq!(params.text(FieldId::Shrinking), None);

        if let Some(gamma) = params.text_mut(FieldId::Gamma) {
            gamma.push_str("0.25");
        }
        assert_eq!(params.gamma, "0.25");

        let params = params.with_gamma(None);
        assert_eq!(params.gamma, "");
    }
}
