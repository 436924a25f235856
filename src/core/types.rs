//! Core type definitions shared by the rules, validation and assembly stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// SVM formulation, encoded the way `svm-train -s` expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SvmType {
    /// C-SVC (multi-class classification)
    #[default]
    CSvc,
    /// nu-SVC (multi-class classification)
    NuSvc,
    /// one-class SVM
    OneClass,
    /// epsilon-SVR (regression)
    EpsilonSvr,
    /// nu-SVR (regression)
    NuSvr,
    /// A code this crate does not know about. Passed through untouched.
    Unrecognized(i32),
}

impl SvmType {
    /// All known SVM types in toolkit order
    pub const ALL: [SvmType; 5] = [
        SvmType::CSvc,
        SvmType::NuSvc,
        SvmType::OneClass,
        SvmType::EpsilonSvr,
        SvmType::NuSvr,
    ];

    /// Map a toolkit code to an SVM type, keeping unknown codes
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SvmType::CSvc,
            1 => SvmType::NuSvc,
            2 => SvmType::OneClass,
            3 => SvmType::EpsilonSvr,
            4 => SvmType::NuSvr,
            other => SvmType::Unrecognized(other),
        }
    }

    /// Toolkit code for `-s`
    pub fn code(self) -> i32 {
        match self {
            SvmType::CSvc => 0,
            SvmType::NuSvc => 1,
            SvmType::OneClass => 2,
            SvmType::EpsilonSvr => 3,
            SvmType::NuSvr => 4,
            SvmType::Unrecognized(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SvmType::CSvc => "C-SVC",
            SvmType::NuSvc => "nu-SVC",
            SvmType::OneClass => "one-class SVM",
            SvmType::EpsilonSvr => "epsilon-SVR",
            SvmType::NuSvr => "nu-SVR",
            SvmType::Unrecognized(_) => "unrecognized",
        }
    }
}

impl From<i32> for SvmType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<SvmType> for i32 {
    fn from(svm_type: SvmType) -> Self {
        svm_type.code()
    }
}

impl fmt::Display for SvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.code(), self.name())
    }
}

/// Kernel function, encoded the way `svm-train -t` expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum KernelType {
    /// u'*v
    Linear,
    /// (gamma*u'*v + coef0)^degree
    Polynomial,
    /// exp(-gamma*|u-v|^2)
    #[default]
    Rbf,
    /// tanh(gamma*u'*v + coef0)
    Sigmoid,
    /// Kernel values supplied in the training file
    Precomputed,
    /// A code this crate does not know about. Passed through untouched.
    Unrecognized(i32),
}

impl KernelType {
    /// All known kernel types in toolkit order
    pub const ALL: [KernelType; 5] = [
        KernelType::Linear,
        KernelType::Polynomial,
        KernelType::Rbf,
        KernelType::Sigmoid,
        KernelType::Precomputed,
    ];

    /// Map a toolkit code to a kernel type, keeping unknown codes
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => KernelType::Linear,
            1 => KernelType::Polynomial,
            2 => KernelType::Rbf,
            3 => KernelType::Sigmoid,
            4 => KernelType::Precomputed,
            other => KernelType::Unrecognized(other),
        }
    }

    /// Toolkit code for `-t`
    pub fn code(self) -> i32 {
        match self {
            KernelType::Linear => 0,
            KernelType::Polynomial => 1,
            KernelType::Rbf => 2,
            KernelType::Sigmoid => 3,
            KernelType::Precomputed => 4,
            KernelType::Unrecognized(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelType::Linear => "linear",
            KernelType::Polynomial => "polynomial",
            KernelType::Rbf => "radial basis function",
            KernelType::Sigmoid => "sigmoid",
            KernelType::Precomputed => "precomputed",
            KernelType::Unrecognized(_) => "unrecognized",
        }
    }
}

impl From<i32> for KernelType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<KernelType> for i32 {
    fn from(kernel_type: KernelType) -> Self {
        kernel_type.code()
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.code(), self.name())
    }
}

/// Identifier for every user-settable training field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Degree,
    Gamma,
    Coef0,
    Cost,
    Nu,
    EpsilonLoss,
    EpsilonTolerance,
    CacheSize,
    Shrinking,
    ProbabilityEstimates,
    ClassWeights,
    CrossValidationFolds,
}

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::Degree,
        FieldId::Gamma,
        FieldId::Coef0,
        FieldId::Cost,
        FieldId::Nu,
        FieldId::EpsilonLoss,
        FieldId::EpsilonTolerance,
        FieldId::CacheSize,
        FieldId::Shrinking,
        FieldId::ProbabilityEstimates,
        FieldId::ClassWeights,
        FieldId::CrossValidationFolds,
    ];

    /// Flag letter used by `svm-train`
    pub fn flag(self) -> &'static str {
        match self {
            FieldId::Degree => "-d",
            FieldId::Gamma => "-g",
            FieldId::Coef0 => "-r",
            FieldId::Cost => "-c",
            FieldId::Nu => "-n",
            FieldId::EpsilonLoss => "-p",
            FieldId::EpsilonTolerance => "-e",
            FieldId::CacheSize => "-m",
            FieldId::Shrinking => "-h",
            FieldId::ProbabilityEstimates => "-b",
            FieldId::ClassWeights => "-w",
            FieldId::CrossValidationFolds => "-v",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Degree => "degree",
            FieldId::Gamma => "gamma",
            FieldId::Coef0 => "coef0",
            FieldId::Cost => "cost",
            FieldId::Nu => "nu",
            FieldId::EpsilonLoss => "epsilon in loss function",
            FieldId::EpsilonTolerance => "termination tolerance",
            FieldId::CacheSize => "cache size",
            FieldId::Shrinking => "shrinking",
            FieldId::ProbabilityEstimates => "probability estimates",
            FieldId::ClassWeights => "class weights",
            FieldId::CrossValidationFolds => "cross validation folds",
        }
    }

    /// Whether the field parses as an integer rather than a float
    pub fn is_integer(self) -> bool {
        matches!(self, FieldId::Degree | FieldId::CrossValidationFolds)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which file path a [`crate::core::ValidationError::MissingPath`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    DataFile,
    ModelFile,
    OutputFile,
    ScaledFile,
    ScaleParameterFile,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathKind::DataFile => "data file",
            PathKind::ModelFile => "model file",
            PathKind::OutputFile => "output file",
            PathKind::ScaledFile => "scaled data file",
            PathKind::ScaleParameterFile => "scale parameter file",
        };
        f.write_str(name)
    }
}

/// The three toolkit operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Scale,
    Train,
    Predict,
}

impl Operation {
    /// Name of the toolkit executable that performs this operation
    pub fn program(self) -> &'static str {
        match self {
            Operation::Scale => "svm-scale",
            Operation::Train => "svm-train",
            Operation::Predict => "svm-predict",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Scale => "scale",
            Operation::Train => "train",
            Operation::Predict => "predict",
        };
        f.write_str(name)
    }
}

/// How `svm-scale` obtains its scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Compute fresh parameters and discard them
    #[default]
    None,
    /// Compute fresh parameters and save them (`-s`)
    Save,
    /// Restore parameters from a file (`-r`)
    Load,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svm_type_codes() {
        for (i, svm_type) in SvmType::ALL.iter().enumerate() {
            assert_eq!(svm_type.code(), i as i32);
            assert_eq!(SvmType::from_code(i as i32), *svm_type);
        }
        assert_eq!(SvmType::from_code(9), SvmType::Unrecognized(9));
        assert_eq!(SvmType::Unrecognized(9).code(), 9);
    }

    #[test]
    fn test_kernel_type_codes() {
        for (i, kernel_type) in KernelType::ALL.iter().enumerate() {
            assert_eq!(kernel_type.code(), i as i32);
            assert_eq!(KernelType::from_code(i as i32), *kernel_type);
        }
        assert_eq!(KernelType::from_code(-3), KernelType::Unrecognized(-3));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SvmType::default(), SvmType::CSvc);
        assert_eq!(KernelType::default(), KernelType::Rbf);
        assert_eq!(ScaleMode::default(), ScaleMode::None);
    }

    #[test]
    fn test_type_serializes_as_code() {
        let json = serde_json::to_string(&KernelType::Sigmoid).unwrap();
        assert_eq!(json, "3");
        let back: SvmType = serde_json::from_str("7").unwrap();
        assert_eq!(back, SvmType::Unrecognized(7));
    }

    #[test]
    fn test_field_flags_unique() {
        let mut flags: Vec<_> = FieldId::ALL.iter().map(|f| f.flag()).collect();
        flags.sort();
        flags.dedup();
        assert_eq!(flags.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(SvmType::EpsilonSvr.to_string(), "3 -- epsilon-SVR");
        assert_eq!(PathKind::DataFile.to_string(), "data file");
        assert_eq!(Operation::Train.program(), "svm-train");
    }
}
