//! Build environment configuration
//!
//! The target runtime, architecture, and destination bucket come from
//! process environment variables set on the function. They are read once
//! at cold start and stay constant for every invocation served by the
//! process.

use crate::error::{StrataError, StrataResult};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the S3 bucket that stores layer archives
pub const BUCKET_VAR: &str = "s3_bucket_name";
/// Environment variable naming the target Lambda architecture
pub const ARCHITECTURE_VAR: &str = "lambda_architecture";
/// Environment variable naming the target Lambda runtime
pub const RUNTIME_VAR: &str = "lambda_runtime";

/// Target environment for the layer being built
#[derive(Debug, Clone)]
pub struct BuildEnvironment {
    /// S3 bucket holding module bundles and published layers
    pub s3_bucket: String,
    /// Target architecture (e.g. "x86_64", "arm64")
    pub architecture: String,
    /// Target runtime (e.g. "python3.9")
    pub runtime: String,
}

impl BuildEnvironment {
    /// Read the build environment from process env vars
    pub fn from_env() -> StrataResult<Self> {
        Ok(Self {
            s3_bucket: require(BUCKET_VAR)?,
            architecture: require(ARCHITECTURE_VAR)?,
            runtime: require(RUNTIME_VAR)?,
        })
    }

    /// Deterministic S3 key under which the finished layer is published
    pub fn storage_key(&self, layer_name: &str) -> String {
        format!("{}_{}_{}.zip", layer_name, self.runtime, self.architecture)
    }

    /// Relative path inside the layer archive where packages must live
    pub fn site_packages_path(&self) -> PathBuf {
        PathBuf::from("python")
            .join("lib")
            .join(&self.runtime)
            .join("site-packages")
    }
}

fn require(name: &'static str) -> StrataResult<String> {
    env::var(name).map_err(|_| StrataError::Configuration(name))
}
