//! Startup environment checks

use std::path::Path;

use log::{info, warn};

use super::ServerOptions;
use crate::capture::{ScriptRunner, probe_interpreter};
use crate::error::Result;

/// What the startup check found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub database_found: bool,
    pub interpreter_available: bool,
}

/// Validate the server environment.
///
/// A missing database or interpreter only produces a warning; unusable
/// options are the one fatal case.
pub async fn validate_environment(
    options: &ServerOptions,
    database_path: &Path,
    runner: &ScriptRunner,
) -> Result<EnvironmentReport> {
    options.validate()?;

    let database_found = database_path.exists();
    if database_found {
        info!("Database found at {}", database_path.display());
    } else {
        warn!("Database not found at {}", database_path.display());
    }

    let interpreter_available = probe_interpreter(runner).await;

    Ok(EnvironmentReport {
        database_found,
        interpreter_available,
    })
}
