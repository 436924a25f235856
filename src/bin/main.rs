//! svmcmd Command Line Interface
//!
//! Builds, validates and optionally runs `svm-scale`, `svm-train` and
//! `svm-predict` command lines from flags or a saved session.

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use svmcmd::params::class_weights;
use svmcmd::{
    active_fields, parse_train_args, resolve_scale_mode, validate, CommandLine, FieldId,
    KernelType, Operation, ParameterSet, Session, SessionError, SvmType,
    ValidationError,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "svmcmd")]
#[command(about = "Validate and assemble LIBSVM tool command lines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "svmcmd contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble an svm-scale command
    Scale(ScaleArgs),
    /// Assemble an svm-train command
    Train(TrainArgs),
    /// Assemble an svm-predict command
    Predict(PredictArgs),
    /// Show which training fields are active for an SVM/kernel type
    Fields(FieldsArgs),
    /// Write a session file holding the default parameters
    SessionInit(SessionInitArgs),
    /// Read an svm-train argument list into a session
    Import(ImportArgs),
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with status {code}")]
    ToolFailed { program: String, code: i32 },
}

type CliResult<T> = std::result::Result<T, CliError>;

/// Options shared by the three toolkit subcommands
#[derive(Args)]
struct CommonArgs {
    /// Start from a saved session instead of the defaults
    #[arg(long)]
    session: Option<PathBuf>,

    /// Write the resulting parameters to a session file
    #[arg(long)]
    save_session: Option<PathBuf>,

    /// Run the assembled command instead of only printing it
    #[arg(long)]
    run: bool,

    /// Directory holding the toolkit executables (default: search PATH)
    #[arg(long)]
    bin_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ScaleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Data file to scale
    #[arg(long)]
    data: Option<String>,

    /// Scaled data output file
    #[arg(long)]
    output: Option<String>,

    /// x scaling lower limit
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<f64>,

    /// x scaling upper limit
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<f64>,

    /// y scaling lower limit
    #[arg(long, allow_hyphen_values = true)]
    y_lower: Option<f64>,

    /// y scaling upper limit
    #[arg(long, allow_hyphen_values = true)]
    y_upper: Option<f64>,

    /// Save scaling parameters to this file
    #[arg(long)]
    save: Option<String>,

    /// Restore scaling parameters from this file
    #[arg(long)]
    load: Option<String>,
}

#[derive(Args)]
struct TrainArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Training data file
    #[arg(long)]
    data: Option<String>,

    /// Model output file (toolkit names it when omitted)
    #[arg(long)]
    model: Option<String>,

    /// SVM type code (0 C-SVC, 1 nu-SVC, 2 one-class, 3 epsilon-SVR, 4 nu-SVR)
    #[arg(long)]
    svm_type: Option<i32>,

    /// Kernel type code (0 linear, 1 polynomial, 2 RBF, 3 sigmoid, 4 precomputed)
    #[arg(long)]
    kernel_type: Option<i32>,

    /// Degree in kernel function
    #[arg(long, allow_hyphen_values = true)]
    degree: Option<String>,

    /// Gamma in kernel function (empty for 1/num_features)
    #[arg(long, allow_hyphen_values = true)]
    gamma: Option<String>,

    /// coef0 in kernel function
    #[arg(long, allow_hyphen_values = true)]
    coef0: Option<String>,

    /// Parameter C of C-SVC, epsilon-SVR and nu-SVR
    #[arg(long, allow_hyphen_values = true)]
    cost: Option<String>,

    /// Parameter nu of nu-SVC, one-class SVM and nu-SVR
    #[arg(long, allow_hyphen_values = true)]
    nu: Option<String>,

    /// Epsilon in loss function of epsilon-SVR
    #[arg(long, allow_hyphen_values = true)]
    epsilon_loss: Option<String>,

    /// Tolerance of termination criterion
    #[arg(long, allow_hyphen_values = true)]
    eps: Option<String>,

    /// Cache memory size in MB
    #[arg(long, allow_hyphen_values = true)]
    cache_size: Option<String>,

    /// Use the shrinking heuristics (0 or 1)
    #[arg(long, value_parser = BoolishValueParser::new())]
    shrinking: Option<bool>,

    /// Train for probability estimates (0 or 1)
    #[arg(long, value_parser = BoolishValueParser::new())]
    probability: Option<bool>,

    /// Class weight as LABEL:WEIGHT, repeatable
    #[arg(long = "weight", allow_hyphen_values = true)]
    weights: Vec<String>,

    /// n-fold cross validation (empty for none)
    #[arg(long)]
    cross_validation: Option<String>,
}

#[derive(Args)]
struct PredictArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Test data file
    #[arg(long)]
    data: Option<String>,

    /// Trained model file
    #[arg(long)]
    model: Option<String>,

    /// Prediction output file
    #[arg(long)]
    output: Option<String>,

    /// Predict probability estimates
    #[arg(long)]
    probability: bool,
}

#[derive(Args)]
struct FieldsArgs {
    /// SVM type code
    #[arg(long, default_value = "0")]
    svm_type: i32,

    /// Kernel type code
    #[arg(long, default_value = "2")]
    kernel_type: i32,
}

#[derive(Args)]
struct SessionInitArgs {
    /// Session file to write
    path: PathBuf,
}

#[derive(Args)]
struct ImportArgs {
    /// Session file to write
    #[arg(long)]
    save_session: Option<PathBuf>,

    /// svm-train arguments, e.g. `-- -s 0 -c 10 train.dat`
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Scale(args) => scale_command(args),
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Fields(args) => fields_command(args),
        Commands::SessionInit(args) => session_init_command(args),
        Commands::Import(args) => import_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        let code = match e {
            CliError::ToolFailed { code, .. } if code != 0 => code,
            _ => 1,
        };
        process::exit(code);
    }
}

fn scale_command(args: ScaleArgs) -> CliResult<()> {
    let mut params = load_params(&args.common)?;

    if let Some(data) = args.data {
        params.data_file_path = data;
    }
    if let Some(output) = args.output {
        params.scaled_file_path = output;
    }
    if let Some(lower) = args.lower {
        params.scale.x_lower = lower;
    }
    if let Some(upper) = args.upper {
        params.scale.x_upper = upper;
    }
    if args.y_lower.is_some() || args.y_upper.is_some() {
        params.scale.y_lower = args.y_lower;
        params.scale.y_upper = args.y_upper;
    }

    if args.save.is_some() || args.load.is_some() {
        params.scale.mode = resolve_scale_mode(args.save.is_some(), args.load.is_some())?;
        params.scale.parameter_file_path = args.save.or(args.load);
    }
    info!("Scale mode: {:?}", params.scale.mode);

    finish(params, Operation::Scale, &args.common)
}

fn train_command(args: TrainArgs) -> CliResult<()> {
    let mut params = load_params(&args.common)?;

    if let Some(data) = args.data {
        params.data_file_path = data;
    }
    if let Some(model) = args.model {
        params.model_file_path = model;
    }
    if let Some(code) = args.svm_type {
        params.svm_type = SvmType::from_code(code);
    }
    if let Some(code) = args.kernel_type {
        params.kernel_type = KernelType::from_code(code);
    }

    let texts = [
        (FieldId::Degree, args.degree),
        (FieldId::Gamma, args.gamma),
        (FieldId::Coef0, args.coef0),
        (FieldId::Cost, args.cost),
        (FieldId::Nu, args.nu),
        (FieldId::EpsilonLoss, args.epsilon_loss),
        (FieldId::EpsilonTolerance, args.eps),
        (FieldId::CacheSize, args.cache_size),
        (FieldId::CrossValidationFolds, args.cross_validation),
    ];
    for (field, text) in texts {
        if let (Some(text), Some(slot)) = (text, params.text_mut(field)) {
            *slot = text;
        }
    }

    if let Some(shrinking) = args.shrinking {
        params.shrinking = shrinking;
    }
    if let Some(probability) = args.probability {
        params.probability_estimates = probability;
    }
    for pair in &args.weights {
        let (label, weight) = class_weights::parse_pair(pair)?;
        params.class_weights.insert(label, weight);
    }

    info!(
        "Training {} with {} kernel",
        params.svm_type.name(),
        params.kernel_type.name()
    );

    finish(params, Operation::Train, &args.common)
}

fn predict_command(args: PredictArgs) -> CliResult<()> {
    let mut params = load_params(&args.common)?;

    if let Some(data) = args.data {
        params.data_file_path = data;
    }
    if let Some(model) = args.model {
        params.model_file_path = model;
    }
    if let Some(output) = args.output {
        params.output_file_path = output;
    }
    if args.probability {
        params.predict_probability = true;
    }

    finish(params, Operation::Predict, &args.common)
}

fn fields_command(args: FieldsArgs) -> CliResult<()> {
    let svm_type = SvmType::from_code(args.svm_type);
    let kernel_type = KernelType::from_code(args.kernel_type);
    let active = active_fields(svm_type, kernel_type);

    println!("SVM type:    {svm_type}");
    println!("Kernel type: {kernel_type}");
    for field in FieldId::ALL {
        let state = if active.contains(field) {
            "active"
        } else {
            "inactive"
        };
        println!("  {:<3} {:<24} {state}", field.flag(), field.label());
    }

    Ok(())
}

fn session_init_command(args: SessionInitArgs) -> CliResult<()> {
    Session::new(ParameterSet::default()).save_to_file(&args.path)?;
    println!("Session written to {}", args.path.display());
    Ok(())
}

fn import_command(args: ImportArgs) -> CliResult<()> {
    let params = parse_train_args(&args.args)?;
    let command = validate(&params, Operation::Train)?.command_line();
    println!("{command}");

    if let Some(path) = &args.save_session {
        Session::new(params).save_to_file(path)?;
    }
    Ok(())
}

fn load_params(common: &CommonArgs) -> CliResult<ParameterSet> {
    match &common.session {
        Some(path) => {
            info!("Loading session from: {path:?}");
            Ok(Session::load_from_file(path)?.parameters)
        }
        None => Ok(ParameterSet::default()),
    }
}

/// Validate, print, and optionally save and run
fn finish(params: ParameterSet, operation: Operation, common: &CommonArgs) -> CliResult<()> {
    let command = validate(&params, operation)?.command_line();

    if let Some(path) = &common.save_session {
        Session::new(params).save_to_file(path)?;
    }

    println!("{command}");

    if common.run {
        run_command(&command, common.bin_dir.as_deref())?;
    }
    Ok(())
}

/// Run a toolkit program with inherited stdio and wait for it
fn run_command(command: &CommandLine, bin_dir: Option<&Path>) -> CliResult<()> {
    let program = command.program_path(bin_dir);
    info!("Running {}", program.display());

    let status = process::Command::new(&program)
        .args(&command.args)
        .status()
        .map_err(|source| CliError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::ToolFailed {
            program: command.program().to_string(),
            code: status.code().unwrap_or(1),
        })
    }
}
