//! Session persistence
//!
//! Saves and restores a [`ParameterSet`] as JSON so a configuration can be
//! picked up again later. This is the only module that touches the file
//! system.

use crate::core::SessionError;
use crate::params::ParameterSet;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A saved parameter set with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub parameters: ParameterSet,
    pub metadata: SessionMetadata,
}

/// Session metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Library version used to write the session
    pub library_version: String,
    /// Save timestamp (RFC 3339)
    pub saved_at: String,
}

impl Session {
    pub fn new(parameters: ParameterSet) -> Self {
        Self {
            parameters,
            metadata: SessionMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                saved_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save session to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        info!("Session saved to {path:?}");
        Ok(())
    }

    /// Load session from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let session: Session = serde_json::from_reader(reader)?;
        session.validate_compatibility()?;
        info!(
            "Session loaded from {path:?} (saved {})",
            session.metadata.saved_at
        );
        Ok(session)
    }

    /// Reject sessions written by an incompatible major version
    pub fn validate_compatibility(&self) -> Result<(), SessionError> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        let current = env!("CARGO_PKG_VERSION");
        if major(&self.metadata.library_version) != major(current) {
            return Err(SessionError::Incompatible(format!(
                "session written by version {}, this is {current}",
                self.metadata.library_version
            )));
        }
        Ok(())
    }
}
