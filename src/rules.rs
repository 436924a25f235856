//! Field activation rules
//!
//! Which training fields mean something for a given SVM type and kernel
//! type. Inactive fields are still sent to the toolkit (it ignores them),
//! but they are not validated and a UI should grey them out.

use crate::core::{FieldId, KernelType, SvmType};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Fields that are active regardless of SVM or kernel type
pub const ALWAYS_ACTIVE: [FieldId; 5] = [
    FieldId::EpsilonTolerance,
    FieldId::CacheSize,
    FieldId::Shrinking,
    FieldId::ProbabilityEstimates,
    FieldId::CrossValidationFolds,
];

/// Fields whose activation depends on the SVM type
pub const SVM_TYPE_FIELDS: [FieldId; 4] = [
    FieldId::Cost,
    FieldId::Nu,
    FieldId::ClassWeights,
    FieldId::EpsilonLoss,
];

/// Fields whose activation depends on the kernel type
pub const KERNEL_FIELDS: [FieldId; 3] = [FieldId::Degree, FieldId::Gamma, FieldId::Coef0];

const SVM_TYPE_RULES: [(SvmType, &[FieldId]); 5] = [
    (SvmType::CSvc, &[FieldId::Cost, FieldId::ClassWeights]),
    (SvmType::NuSvc, &[FieldId::Nu]),
    (SvmType::OneClass, &[FieldId::Nu]),
    (SvmType::EpsilonSvr, &[FieldId::Cost, FieldId::EpsilonLoss]),
    (SvmType::NuSvr, &[FieldId::Cost, FieldId::Nu]),
];

const KERNEL_RULES: [(KernelType, &[FieldId]); 5] = [
    (KernelType::Linear, &[]),
    (
        KernelType::Polynomial,
        &[FieldId::Degree, FieldId::Gamma, FieldId::Coef0],
    ),
    (KernelType::Rbf, &[FieldId::Gamma]),
    (KernelType::Sigmoid, &[FieldId::Gamma, FieldId::Coef0]),
    (KernelType::Precomputed, &[]),
];

/// Fields switched on by an SVM type. Unknown types switch nothing on.
pub fn svm_type_fields(svm_type: SvmType) -> &'static [FieldId] {
    match SVM_TYPE_RULES.iter().find(|(t, _)| *t == svm_type) {
        Some((_, fields)) => fields,
        None => {
            warn!("Unrecognized SVM type {}, deactivating dependent fields", svm_type.code());
            &[]
        }
    }
}

/// Fields switched on by a kernel type. Unknown kernels switch nothing on.
pub fn kernel_fields(kernel_type: KernelType) -> &'static [FieldId] {
    match KERNEL_RULES.iter().find(|(t, _)| *t == kernel_type) {
        Some((_, fields)) => fields,
        None => {
            warn!(
                "Unrecognized kernel type {}, deactivating dependent fields",
                kernel_type.code()
            );
            &[]
        }
    }
}

/// Set of active fields for one (SVM type, kernel type) selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFields {
    fields: BTreeSet<FieldId>,
}

impl ActiveFields {
    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }

    /// Active fields in [`FieldId`] order
    pub fn iter(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.iter().copied()
    }

    /// Fields a UI should grey out
    pub fn inactive(&self) -> impl Iterator<Item = FieldId> + '_ {
        FieldId::ALL.into_iter().filter(|f| !self.fields.contains(f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Compute the active fields for an SVM type and kernel type
pub fn active_fields(svm_type: SvmType, kernel_type: KernelType) -> ActiveFields {
    let fields: BTreeSet<FieldId> = ALWAYS_ACTIVE
        .iter()
        .chain(svm_type_fields(svm_type))
        .chain(kernel_fields(kernel_type))
        .copied()
        .collect();

    debug!(
        "Active fields for {} / {}: {:?}",
        svm_type.name(),
        kernel_type.name(),
        fields
    );

    ActiveFields { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_svc_rbf() {
        let active = active_fields(SvmType::CSvc, KernelType::Rbf);
        assert!(active.contains(FieldId::Cost));
        assert!(active.contains(FieldId::ClassWeights));
        assert!(active.contains(FieldId::Gamma));
        assert!(!active.contains(FieldId::Nu));
        assert!(!active.contains(FieldId::Degree));
        assert!(!active.contains(FieldId::Coef0));
        assert!(!active.contains(FieldId::EpsilonLoss));
    }

    #[test]
    fn test_always_active_fields() {
        for svm_type in SvmType::ALL {
            for kernel_type in KernelType::ALL {
                let active = active_fields(svm_type, kernel_type);
                for field in ALWAYS_ACTIVE {
                    assert!(active.contains(field));
                }
            }
        }
    }

    #[test]
    fn test_unrecognized_deactivates_everything_optional() {
        let active = active_fields(SvmType::Unrecognized(8), KernelType::Unrecognized(8));
        assert_eq!(active.len(), ALWAYS_ACTIVE.len());
        let inactive: Vec<_> = active.inactive().collect();
        assert_eq!(inactive.len(), SVM_TYPE_FIELDS.len() + KERNEL_FIELDS.len());
    }

    #[test]
    fn test_rules_never_touch_always_active_fields() {
        for (_, fields) in SVM_TYPE_RULES {
            assert!(fields.iter().all(|f| SVM_TYPE_FIELDS.contains(f)));
        }
        for (_, fields) in KERNEL_RULES {
            assert!(fields.iter().all(|f| KERNEL_FIELDS.contains(f)));
        }
    }
}
