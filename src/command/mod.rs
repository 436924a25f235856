//! Command assembly for the toolkit executables
//!
//! A [`CommandLine`] is what gets handed to whatever runs the toolkit:
//! the program name plus the exact argument vector.

pub mod assemble;
pub mod parse;

pub use self::assemble::*;
pub use self::parse::*;

use crate::core::Operation;
use crate::validation::ValidatedParameterSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program name and ordered arguments for one toolkit invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub operation: Operation,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(operation: Operation, args: Vec<String>) -> Self {
        Self { operation, args }
    }

    /// Executable name, e.g. `svm-train`
    pub fn program(&self) -> &'static str {
        self.operation.program()
    }

    /// Path of the executable inside `dir`, or the bare name for a PATH lookup
    pub fn program_path(&self, dir: Option<&Path>) -> PathBuf {
        match dir {
            Some(dir) => dir.join(self.program()),
            None => PathBuf::from(self.program()),
        }
    }
}

impl fmt::Display for CommandLine {
    /// Renders a copy-pasteable shell command
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

impl ValidatedParameterSet {
    /// Assemble the arguments for the validated operation
    pub fn args(&self) -> Vec<String> {
        match self {
            ValidatedParameterSet::Scale(scale) => build_scale_command(
                &scale.request,
                &scale.data_file_path,
                &scale.scaled_file_path,
            ),
            ValidatedParameterSet::Train(train) => build_train_command(
                &train.params,
                train.cross_validation_folds,
                &train.data_file_path,
                &train.model_file_path,
            ),
            ValidatedParameterSet::Predict(predict) => build_predict_command(
                predict.probability_estimates,
                &predict.data_file_path,
                &predict.model_file_path,
                &predict.output_file_path,
            ),
        }
    }

    pub fn command_line(&self) -> CommandLine {
        CommandLine::new(self.operation(), self.args())
    }
}
