//! Parameter validation and command assembly for the LIBSVM tools
//!
//! Decides which options matter for a chosen SVM type and kernel, checks a
//! user-edited parameter set, and turns it into the exact argument vectors
//! expected by `svm-scale`, `svm-train` and `svm-predict`.
//!
//! # Quick Start
//!
//! ```rust
//! use svmcmd::{validate, Operation, ParameterSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ParameterSet::new().with_data_file("train.dat");
//! let command = validate(&params, Operation::Train)?.command_line();
//! assert_eq!(
//!     command.to_string(),
//!     "svm-train -s 0 -t 2 -d 3 -r 0 -c 1 -n 0.5 -p 0.1 -m 100 -e 0.001 -h 1 -b 0 train.dat"
//! );
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod core;
pub mod params;
pub mod rules;
pub mod session;
pub mod validation;

// Re-export main types for convenience
pub use crate::command::{
    build_predict_command, build_scale_command, build_train_command, parse_train_args,
    CommandLine,
};
pub use crate::core::*;
pub use crate::params::{resolve_scale_mode, ClassWeights, ParameterSet, ScaleRequest};
pub use crate::rules::{active_fields, ActiveFields};
pub use crate::session::Session;
pub use crate::validation::{validate, TrainParameters, ValidatedParameterSet};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
