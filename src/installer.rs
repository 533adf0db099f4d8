//! Package installer abstraction
//!
//! Provides a trait for installing Python packages into a target
//! directory, with one real implementation that shells out to pip.
//! Tests substitute a fake so the pipeline can run without pip.

use crate::error::{StrataError, StrataResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Serialize a package list into requirements.txt format.
///
/// Entries are appended verbatim in order, each followed by a newline.
/// No deduplication and no syntax validation; pip owns both.
pub fn format_requirements(packages: &[String]) -> String {
    let mut requirements = String::new();
    for package in packages {
        requirements.push_str(package);
        requirements.push('\n');
    }
    requirements
}

/// Abstract dependency resolver interface
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install the packages listed in the requirements file into `target`
    async fn install(&self, requirements: &Path, target: &Path) -> StrataResult<()>;
}

/// Installer that invokes pip as a subprocess
pub struct PipInstaller {
    program: String,
}

impl PipInstaller {
    /// Create an installer using the default `pip3` binary
    pub fn new() -> Self {
        Self {
            program: "pip3".to_string(),
        }
    }

    /// Create an installer using a specific program (used in tests)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PipInstaller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageInstaller for PipInstaller {
    async fn install(&self, requirements: &Path, target: &Path) -> StrataResult<()> {
        info!(
            requirements = %requirements.display(),
            target = %target.display(),
            "installing packages"
        );
        debug!("Executing: {} install -r ... --target ...", self.program);

        // Stdio is inherited so pip output lands in the invocation log.
        let status = Command::new(&self.program)
            .arg("install")
            .arg("-r")
            .arg(requirements)
            .arg("--target")
            .arg(target)
            .status()
            .await
            .map_err(|e| StrataError::io(format!("invoking {}", self.program), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(StrataError::Install {
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
