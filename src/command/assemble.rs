//! Argument vectors for `svm-scale`, `svm-train` and `svm-predict`
//!
//! These functions are total: every input they receive has already been
//! through the validation gate, so they only arrange tokens.

use crate::core::ScaleMode;
use crate::params::ScaleRequest;
use crate::validation::TrainParameters;

/// Format a float the way it is passed to the toolkit (`1`, `0.5`, `0.001`)
fn num(value: f64) -> String {
    value.to_string()
}

fn flag_bit(value: bool) -> String {
    let bit = if value { "1" } else { "0" };
    bit.to_string()
}

/// `[-l lower] [-u upper] [-y y_lower y_upper] [-s save | -r restore] data output`
pub fn build_scale_command(
    request: &ScaleRequest,
    data_file_path: &str,
    scaled_output_path: &str,
) -> Vec<String> {
    let mut args = vec![
        "-l".to_string(),
        num(request.x_lower),
        "-u".to_string(),
        num(request.x_upper),
    ];

    if let Some((lower, upper)) = request.y_bounds() {
        args.extend(["-y".to_string(), num(lower), num(upper)]);
    }

    let parameter_file = request.parameter_file_path.clone().unwrap_or_default();
    match request.mode {
        ScaleMode::Save => args.extend(["-s".to_string(), parameter_file]),
        ScaleMode::Load => args.extend(["-r".to_string(), parameter_file]),
        ScaleMode::None => {}
    }

    args.push(data_file_path.to_string());
    args.push(scaled_output_path.to_string());
    args
}

/// Every option flag is emitted in fixed order, whether or not the current
/// SVM/kernel type uses it. Only `-g`, `-w` and `-v` are conditional.
pub fn build_train_command(
    params: &TrainParameters,
    cross_validation_folds: Option<u32>,
    data_file_path: &str,
    model_file_path: &str,
) -> Vec<String> {
    let mut args = vec![
        "-s".to_string(),
        params.svm_type.code().to_string(),
        "-t".to_string(),
        params.kernel_type.code().to_string(),
        "-d".to_string(),
        params.degree.to_string(),
    ];

    if let Some(gamma) = params.gamma {
        args.extend(["-g".to_string(), num(gamma)]);
    }

    args.extend([
        "-r".to_string(),
        num(params.coef0),
        "-c".to_string(),
        num(params.cost),
        "-n".to_string(),
        num(params.nu),
        "-p".to_string(),
        num(params.epsilon_loss),
        "-m".to_string(),
        num(params.cache_size_mb),
        "-e".to_string(),
        num(params.epsilon_tolerance),
        "-h".to_string(),
        flag_bit(params.shrinking),
        "-b".to_string(),
        flag_bit(params.probability_estimates),
    ]);

    for entry in params.class_weights.iter() {
        args.push(format!("-w{}", entry.label));
        args.push(num(entry.weight));
    }

    if let Some(folds) = cross_validation_folds {
        args.extend(["-v".to_string(), folds.to_string()]);
    }

    args.push(data_file_path.to_string());
    if !model_file_path.is_empty() {
        args.push(model_file_path.to_string());
    }
    args
}

/// `-b {0,1} data model output`
pub fn build_predict_command(
    probability_estimates: bool,
    data_file_path: &str,
    model_file_path: &str,
    output_file_path: &str,
) -> Vec<String> {
    vec![
        "-b".to_string(),
        flag_bit(probability_estimates),
        data_file_path.to_string(),
        model_file_path.to_string(),
        output_file_path.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KernelType, SvmType};
    use crate::params::ClassWeights;

    #[test]
    fn test_default_train_command() {
        let args = build_train_command(&TrainParameters::default(), None, "train.dat", "");
        assert_eq!(
            args.join(" "),
            "-s 0 -t 2 -d 3 -r 0 -c 1 -n 0.5 -p 0.1 -m 100 -e 0.001 -h 1 -b 0 train.dat"
        );
    }

    #[test]
    fn test_train_command_optional_parts() {
        let params = TrainParameters {
            svm_type: SvmType::NuSvr,
            kernel_type: KernelType::Sigmoid,
            gamma: Some(0.25),
            shrinking: false,
            probability_estimates: true,
            class_weights: vec![(2, 0.5), (1, 3.0)].into_iter().collect::<ClassWeights>(),
            ..TrainParameters::default()
        };
        let args = build_train_command(&params, Some(5), "train.dat", "train.model");
        assert_eq!(
            args.join(" "),
            "-s 4 -t 3 -d 3 -g 0.25 -r 0 -c 1 -n 0.5 -p 0.1 -m 100 -e 0.001 -h 0 -b 1 \
             -w2 0.5 -w1 3 -v 5 train.dat train.model"
        );
    }

    #[test]
    fn test_negative_gamma_is_emitted() {
        let params = TrainParameters {
            gamma: Some(-1.0),
            ..TrainParameters::default()
        };
        let args = build_train_command(&params, None, "d", "");
        let pos = args.iter().position(|a| a == "-g").unwrap();
        assert_eq!(args[pos + 1], "-1");
    }

    #[test]
    fn test_scale_command_save() {
        let mut request = ScaleRequest::new()
            .with_x_bounds(0.0, 1.0)
            .with_parameter_file("p.txt");
        request.set_save(true);
        assert_eq!(
            build_scale_command(&request, "data.dat", "data.scaled"),
            vec!["-l", "0", "-u", "1", "-s", "p.txt", "data.dat", "data.scaled"]
        );
    }

    #[test]
    fn test_scale_command_load_with_y() {
        let mut request = ScaleRequest::new()
            .with_y_bounds(-2.5, 2.5)
            .with_parameter_file("range");
        request.set_load(true);
        assert_eq!(
            build_scale_command(&request, "in", "out").join(" "),
            "-l -1 -u 1 -y -2.5 2.5 -r range in out"
        );
    }

    #[test]
    fn test_scale_command_none() {
        let request = ScaleRequest::new().with_parameter_file("ignored");
        assert_eq!(
            build_scale_command(&request, "in", "out").join(" "),
            "-l -1 -u 1 in out"
        );
    }

    #[test]
    fn test_predict_command() {
        assert_eq!(
            build_predict_command(true, "test.dat", "train.model", "out"),
            vec!["-b", "1", "test.dat", "train.model", "out"]
        );
        assert_eq!(build_predict_command(false, "a", "b", "c")[1], "0");
    }
}
