//! Read an `svm-train` argument vector back into a parameter set

use crate::core::{FieldId, KernelType, Result, SvmType, ValidationError};
use crate::params::{class_weights, ParameterSet};
use log::debug;

/// Parse `svm-train` options and positional paths.
///
/// Numeric values are stored as text, exactly as given, so the usual
/// validation still applies afterwards. Options not given keep their
/// defaults.
pub fn parse_train_args<S: AsRef<str>>(args: &[S]) -> Result<ParameterSet> {
    let mut params = ParameterSet::new();
    let mut positional = Vec::new();
    let mut iter = args.iter().map(|s| s.as_ref());

    while let Some(arg) = iter.next() {
        if !arg.starts_with('-') || arg.len() < 2 {
            positional.push(arg);
            continue;
        }

        if let Some(label) = arg.strip_prefix("-w") {
            let weight = iter
                .next()
                .ok_or(ValidationError::Parse(FieldId::ClassWeights))?;
            let (label, weight) = class_weights::parse_pair(&format!("{label}:{weight}"))?;
            params.class_weights.insert(label, weight);
            continue;
        }

        let mut value = |what: &str| {
            iter.next()
                .ok_or_else(|| ValidationError::Range(format!("option {arg} needs a {what}")))
        };

        match arg {
            "-s" => params.svm_type = SvmType::from_code(parse_code(value("type code")?)?),
            "-t" => params.kernel_type = KernelType::from_code(parse_code(value("type code")?)?),
            "-h" => params.shrinking = parse_bit(value("0 or 1")?, FieldId::Shrinking)?,
            "-b" => {
                params.probability_estimates =
                    parse_bit(value("0 or 1")?, FieldId::ProbabilityEstimates)?
            }
            "-q" => debug!("Ignoring quiet flag"),
            _ => {
                let field = text_field_for_flag(arg)
                    .ok_or_else(|| ValidationError::Range(format!("unknown option {arg}")))?;
                let text = value("value").map_err(|_| ValidationError::Parse(field))?;
                if let Some(slot) = params.text_mut(field) {
                    *slot = text.to_string();
                }
            }
        }
    }

    match positional.as_slice() {
        [data] => params.data_file_path = data.to_string(),
        [data, model] => {
            params.data_file_path = data.to_string();
            params.model_file_path = model.to_string();
        }
        [] => {}
        more => {
            return Err(ValidationError::Range(format!(
                "expected at most 2 file arguments, got {}",
                more.len()
            )))
        }
    }

    Ok(params)
}

fn text_field_for_flag(flag: &str) -> Option<FieldId> {
    FieldId::ALL.into_iter().find(|f| {
        f.flag() == flag
            && !matches!(
                f,
                FieldId::Shrinking | FieldId::ProbabilityEstimates | FieldId::ClassWeights
            )
    })
}

fn parse_code(text: &str) -> Result<i32> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::Range(format!("invalid type code {text:?}")))
}

fn parse_bit(text: &str, field: FieldId) -> Result<bool> {
    match text.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ValidationError::Parse(field)),
    }
}
