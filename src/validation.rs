//! Validation gate between the editable parameter set and the assembler
//!
//! [`validate`] parses the text fields that matter for the requested
//! operation and returns typed values the command assembler can consume
//! without further checks.

use crate::core::{
    FieldId, KernelType, Operation, PathKind, Result, ScaleMode, SvmType, ValidationError,
};
use crate::params::{
    ClassWeights, ParameterSet, ScaleRequest, DEFAULT_CACHE_SIZE_MB, DEFAULT_COEF0, DEFAULT_COST,
    DEFAULT_DEGREE, DEFAULT_EPSILON_LOSS, DEFAULT_EPSILON_TOLERANCE, DEFAULT_NU,
};
use crate::rules::{active_fields, ActiveFields};
use log::debug;

/// Fields parsed for training even when the rules mark them inactive
pub const ALWAYS_CHECKED: [FieldId; 4] = [
    FieldId::Cost,
    FieldId::EpsilonTolerance,
    FieldId::CacheSize,
    FieldId::CrossValidationFolds,
];

/// Typed `svm-train` options
#[derive(Debug, Clone, PartialEq)]
pub struct TrainParameters {
    pub svm_type: SvmType,
    pub kernel_type: KernelType,
    pub degree: i32,
    /// `None` leaves gamma to the toolkit (1/num_features)
    pub gamma: Option<f64>,
    pub coef0: f64,
    pub cost: f64,
    pub nu: f64,
    pub epsilon_loss: f64,
    pub epsilon_tolerance: f64,
    pub cache_size_mb: f64,
    pub shrinking: bool,
    pub probability_estimates: bool,
    pub class_weights: ClassWeights,
}

impl Default for TrainParameters {
    fn default() -> Self {
        Self {
            svm_type: SvmType::CSvc,
            kernel_type: KernelType::Rbf,
            degree: DEFAULT_DEGREE,
            gamma: None,
            coef0: DEFAULT_COEF0,
            cost: DEFAULT_COST,
            nu: DEFAULT_NU,
            epsilon_loss: DEFAULT_EPSILON_LOSS,
            epsilon_tolerance: DEFAULT_EPSILON_TOLERANCE,
            cache_size_mb: DEFAULT_CACHE_SIZE_MB,
            shrinking: true,
            probability_estimates: false,
            class_weights: ClassWeights::new(),
        }
    }
}

/// A training request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrain {
    pub params: TrainParameters,
    pub cross_validation_folds: Option<u32>,
    pub data_file_path: String,
    /// Empty lets the toolkit derive the model name
    pub model_file_path: String,
}

/// A prediction request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPredict {
    pub probability_estimates: bool,
    pub data_file_path: String,
    pub model_file_path: String,
    pub output_file_path: String,
}

/// A scaling request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedScale {
    pub request: ScaleRequest,
    pub data_file_path: String,
    pub scaled_file_path: String,
}

/// Output of the validation gate, one variant per operation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedParameterSet {
    Scale(ValidatedScale),
    Train(ValidatedTrain),
    Predict(ValidatedPredict),
}

impl ValidatedParameterSet {
    pub fn operation(&self) -> Operation {
        match self {
            ValidatedParameterSet::Scale(_) => Operation::Scale,
            ValidatedParameterSet::Train(_) => Operation::Train,
            ValidatedParameterSet::Predict(_) => Operation::Predict,
        }
    }
}

/// Check a parameter set for the given operation
pub fn validate(params: &ParameterSet, operation: Operation) -> Result<ValidatedParameterSet> {
    match operation {
        Operation::Scale => validate_scale(params).map(ValidatedParameterSet::Scale),
        Operation::Train => validate_train(params).map(ValidatedParameterSet::Train),
        Operation::Predict => validate_predict(params).map(ValidatedParameterSet::Predict),
    }
}

/// Validate the training options and paths
pub fn validate_train(params: &ParameterSet) -> Result<ValidatedTrain> {
    let active = active_fields(params.svm_type, params.kernel_type);
    let fields = FieldReader {
        params,
        active: &active,
    };

    let degree = fields.int(FieldId::Degree, DEFAULT_DEGREE)?;
    let gamma = fields.gamma()?;
    let coef0 = fields.float(FieldId::Coef0, DEFAULT_COEF0)?;
    let cost = fields.float(FieldId::Cost, DEFAULT_COST)?;
    let nu = fields.float(FieldId::Nu, DEFAULT_NU)?;
    let epsilon_loss = fields.float(FieldId::EpsilonLoss, DEFAULT_EPSILON_LOSS)?;
    let epsilon_tolerance = fields.float(FieldId::EpsilonTolerance, DEFAULT_EPSILON_TOLERANCE)?;
    let cache_size_mb = fields.float(FieldId::CacheSize, DEFAULT_CACHE_SIZE_MB)?;
    let cross_validation_folds = fields.folds()?;

    if cache_size_mb <= 0.0 {
        return Err(range("cache size must be greater than 0"));
    }
    if epsilon_tolerance <= 0.0 {
        return Err(range("termination tolerance must be greater than 0"));
    }
    if active.contains(FieldId::Cost) && cost <= 0.0 {
        return Err(range("cost must be greater than 0"));
    }
    if active.contains(FieldId::Nu) && !(nu > 0.0 && nu <= 1.0) {
        return Err(range("nu must be in (0, 1]"));
    }
    if active.contains(FieldId::EpsilonLoss) && epsilon_loss < 0.0 {
        return Err(range("epsilon in loss function must not be negative"));
    }
    if active.contains(FieldId::Degree) && degree < 0 {
        return Err(range("degree must not be negative"));
    }
    // Weights are sent for every SVM type
    if params.class_weights.iter().any(|e| !e.weight.is_finite()) {
        return Err(ValidationError::Parse(FieldId::ClassWeights));
    }

    require_path(&params.data_file_path, PathKind::DataFile)?;
    let model_file_path = if params.model_file_path.trim().is_empty() {
        String::new()
    } else {
        params.model_file_path.clone()
    };

    Ok(ValidatedTrain {
        params: TrainParameters {
            svm_type: params.svm_type,
            kernel_type: params.kernel_type,
            degree,
            gamma,
            coef0,
            cost,
            nu,
            epsilon_loss,
            epsilon_tolerance,
            cache_size_mb,
            shrinking: params.shrinking,
            probability_estimates: params.probability_estimates,
            class_weights: params.class_weights.clone(),
        },
        cross_validation_folds,
        data_file_path: params.data_file_path.clone(),
        model_file_path,
    })
}

/// Validate the prediction paths
pub fn validate_predict(params: &ParameterSet) -> Result<ValidatedPredict> {
    require_path(&params.data_file_path, PathKind::DataFile)?;
    require_path(&params.model_file_path, PathKind::ModelFile)?;
    require_path(&params.output_file_path, PathKind::OutputFile)?;

    Ok(ValidatedPredict {
        probability_estimates: params.predict_probability,
        data_file_path: params.data_file_path.clone(),
        model_file_path: params.model_file_path.clone(),
        output_file_path: params.output_file_path.clone(),
    })
}

/// Validate the scale bounds and paths.
///
/// Bounds are not checked in load mode since the parameter file supplies them.
pub fn validate_scale(params: &ParameterSet) -> Result<ValidatedScale> {
    let request = &params.scale;

    if request.mode != ScaleMode::Load {
        check_scale_bounds(request)?;
    } else {
        debug!("Scale bounds come from the parameter file, skipping range checks");
    }

    require_path(&params.data_file_path, PathKind::DataFile)?;
    require_path(&params.scaled_file_path, PathKind::ScaledFile)?;
    if request.mode != ScaleMode::None {
        require_path(
            request.parameter_file_path.as_deref().unwrap_or_default(),
            PathKind::ScaleParameterFile,
        )?;
    }

    Ok(ValidatedScale {
        request: request.clone(),
        data_file_path: params.data_file_path.clone(),
        scaled_file_path: params.scaled_file_path.clone(),
    })
}

fn check_scale_bounds(request: &ScaleRequest) -> Result<()> {
    // Written as negations so NaN bounds are rejected too
    if !(request.x_lower < request.x_upper) {
        return Err(range(format!(
            "x lower bound {} must be below x upper bound {}",
            request.x_lower, request.x_upper
        )));
    }

    match (request.y_lower, request.y_upper) {
        (None, None) => Ok(()),
        (Some(lower), Some(upper)) if !(lower < upper) => Err(range(format!(
            "y lower bound {lower} must be below y upper bound {upper}"
        ))),
        (Some(_), Some(_)) => Ok(()),
        _ => Err(range("y scaling needs both a lower and an upper bound")),
    }
}

fn require_path(path: &str, kind: PathKind) -> Result<()> {
    if path.trim().is_empty() {
        Err(ValidationError::MissingPath(kind))
    } else {
        Ok(())
    }
}

fn range<S: Into<String>>(description: S) -> ValidationError {
    ValidationError::Range(description.into())
}

/// Reads numeric fields, strictly for checked fields and leniently otherwise
struct FieldReader<'a> {
    params: &'a ParameterSet,
    active: &'a ActiveFields,
}

impl FieldReader<'_> {
    fn is_checked(&self, field: FieldId) -> bool {
        self.active.contains(field) || ALWAYS_CHECKED.contains(&field)
    }

    fn text(&self, field: FieldId) -> &str {
        self.params.text(field).unwrap_or_default().trim()
    }

    fn float(&self, field: FieldId, default: f64) -> Result<f64> {
        let parsed = parse_float(self.text(field), field);
        self.settle(field, parsed, default)
    }

    fn int(&self, field: FieldId, default: i32) -> Result<i32> {
        let parsed = parse_int(self.text(field), field);
        self.settle(field, parsed, default)
    }

    /// Blank gamma is always valid and means "use the toolkit default"
    fn gamma(&self) -> Result<Option<f64>> {
        let text = self.text(FieldId::Gamma);
        if text.is_empty() {
            return Ok(None);
        }
        match parse_float(text, FieldId::Gamma) {
            Ok(gamma) => Ok(Some(gamma)),
            Err(e) if self.is_checked(FieldId::Gamma) => Err(e),
            Err(_) => {
                debug!("Ignoring unparsable inactive gamma {text:?}");
                Ok(None)
            }
        }
    }

    /// Blank means no cross validation; otherwise at least two folds
    fn folds(&self) -> Result<Option<u32>> {
        let text = self.text(FieldId::CrossValidationFolds);
        if text.is_empty() {
            return Ok(None);
        }
        let folds = parse_int(text, FieldId::CrossValidationFolds)?;
        if folds < 2 {
            return Err(range(format!(
                "cross validation needs at least 2 folds, got {folds}"
            )));
        }
        Ok(Some(folds as u32))
    }

    fn settle<T: std::fmt::Debug>(
        &self,
        field: FieldId,
        parsed: Result<T>,
        default: T,
    ) -> Result<T> {
        match parsed {
            Ok(value) => Ok(value),
            Err(e) if self.is_checked(field) => Err(e),
            Err(_) => {
                debug!("Inactive field {field} is not a number, sending default {default:?}");
                Ok(default)
            }
        }
    }
}

/// Parse a finite float
pub fn parse_float(text: &str, field: FieldId) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::Parse(field)),
    }
}

/// Parse an integer
pub fn parse_int(text: &str, field: FieldId) -> Result<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::Parse(field))
}
