//! Scaling request and the save/load mode resolver

use crate::core::{ScaleMode, ValidationError};
use serde::{Deserialize, Serialize};

/// Default lower bound for scaled feature values
pub const DEFAULT_X_LOWER: f64 = -1.0;
/// Default upper bound for scaled feature values
pub const DEFAULT_X_UPPER: f64 = 1.0;

/// Turn the two scale checkboxes into a mode.
///
/// Save and load are mutually exclusive; both set is rejected.
pub fn resolve_scale_mode(save: bool, load: bool) -> Result<ScaleMode, ValidationError> {
    match (save, load) {
        (false, false) => Ok(ScaleMode::None),
        (true, false) => Ok(ScaleMode::Save),
        (false, true) => Ok(ScaleMode::Load),
        (true, true) => Err(ValidationError::ConflictingMode),
    }
}

/// Settings for one `svm-scale` invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRequest {
    pub mode: ScaleMode,
    /// File written with `-s` or read with `-r`
    pub parameter_file_path: Option<String>,
    pub x_lower: f64,
    pub x_upper: f64,
    pub y_lower: Option<f64>,
    pub y_upper: Option<f64>,
}

impl Default for ScaleRequest {
    fn default() -> Self {
        Self {
            mode: ScaleMode::None,
            parameter_file_path: None,
            x_lower: DEFAULT_X_LOWER,
            x_upper: DEFAULT_X_UPPER,
            y_lower: None,
            y_upper: None,
        }
    }
}

impl ScaleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from the two checkboxes
    pub fn from_toggles(save: bool, load: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            mode: resolve_scale_mode(save, load)?,
            ..Self::default()
        })
    }

    /// Tick or untick "save". Ticking it unticks "load".
    pub fn set_save(&mut self, save: bool) {
        if save {
            self.mode = ScaleMode::Save;
        } else if self.mode == ScaleMode::Save {
            self.mode = ScaleMode::None;
        }
    }

    /// Tick or untick "load". Ticking it unticks "save".
    pub fn set_load(&mut self, load: bool) {
        if load {
            self.mode = ScaleMode::Load;
        } else if self.mode == ScaleMode::Load {
            self.mode = ScaleMode::None;
        }
    }

    pub fn is_save(&self) -> bool {
        self.mode == ScaleMode::Save
    }

    pub fn is_load(&self) -> bool {
        self.mode == ScaleMode::Load
    }

    /// Whether the parameter file path field is editable
    pub fn uses_parameter_file(&self) -> bool {
        self.mode != ScaleMode::None
    }

    pub fn with_parameter_file<S: Into<String>>(mut self, path: S) -> Self {
        self.parameter_file_path = Some(path.into());
        self
    }

    pub fn with_x_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.x_lower = lower;
        self.x_upper = upper;
        self
    }

    pub fn with_y_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.y_lower = Some(lower);
        self.y_upper = Some(upper);
        self
    }

    /// Both y bounds, if both are set
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.y_lower.zip(self.y_upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_scale_mode() {
        assert_eq!(resolve_scale_mode(false, false), Ok(ScaleMode::None));
        assert_eq!(resolve_scale_mode(true, false), Ok(ScaleMode::Save));
        assert_eq!(resolve_scale_mode(false, true), Ok(ScaleMode::Load));
        assert_eq!(
            resolve_scale_mode(true, true),
            Err(ValidationError::ConflictingMode)
        );
    }

    #[test]
    fn test_toggles_are_exclusive() {
        let mut request = ScaleRequest::new();
        request.set_save(true);
        assert!(request.is_save());

        request.set_load(true);
        assert!(request.is_load());
        assert!(!request.is_save());

        // Unticking save while load is selected changes nothing
        request.set_save(false);
        assert!(request.is_load());

        request.set_load(false);
        assert_eq!(request.mode, ScaleMode::None);
        assert!(!request.uses_parameter_file());
    }

    #[test]
    fn test_from_toggles() {
        assert_eq!(
            ScaleRequest::from_toggles(false, true).unwrap().mode,
            ScaleMode::Load
        );
        assert!(ScaleRequest::from_toggles(true, true).is_err());
    }

    #[test]
    fn test_y_bounds() {
        let request = ScaleRequest::new();
        assert_eq!(request.y_bounds(), None);
        assert_eq!(request.x_lower, -1.0);
        assert_eq!(request.x_upper, 1.0);

        let request = request.with_y_bounds(0.0, 10.0);
        assert_eq!(request.y_bounds(), Some((0.0, 10.0)));

        let lone = ScaleRequest {
            y_lower: Some(0.0),
            ..ScaleRequest::default()
        };
        assert_eq!(lone.y_bounds(), None);
    }
}
