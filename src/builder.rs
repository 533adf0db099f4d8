//! Layer build pipeline
//!
//! Orchestrates a single build: validate the request, lay out the layer
//! skeleton, install pip packages and/or merge a module bundle, zip the
//! tree, and publish it. Each step fails the whole build; nothing is
//! retried and nothing is cleaned up on failure.

use crate::archive;
use crate::config::BuildEnvironment;
use crate::error::{StrataError, StrataResult};
use crate::event::{BuildRequest, BuildResponse};
use crate::installer::{format_requirements, PackageInstaller};
use crate::storage::ObjectStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default scratch root inside the Lambda execution environment
const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// Builds one layer per invocation
pub struct LayerBuilder {
    env: BuildEnvironment,
    store: Box<dyn ObjectStore>,
    installer: Box<dyn PackageInstaller>,
    scratch_dir: PathBuf,
}

impl LayerBuilder {
    /// Create a builder using the default scratch location
    pub fn new(
        env: BuildEnvironment,
        store: Box<dyn ObjectStore>,
        installer: Box<dyn PackageInstaller>,
    ) -> Self {
        Self::with_scratch_dir(env, store, installer, PathBuf::from(DEFAULT_SCRATCH_DIR))
    }

    /// Create a builder with a custom scratch location (used in tests)
    pub fn with_scratch_dir(
        env: BuildEnvironment,
        store: Box<dyn ObjectStore>,
        installer: Box<dyn PackageInstaller>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            env,
            store,
            installer,
            scratch_dir,
        }
    }

    /// Run the full pipeline for one request
    pub async fn build(&self, request: &BuildRequest) -> StrataResult<BuildResponse> {
        let layer_name = request.validate()?;

        let work_dir = self.scratch_dir.join("lambda-layer");
        let site_packages = work_dir.join(self.env.site_packages_path());
        let storage_key = self.env.storage_key(layer_name);

        info!("Creating layer skeleton: {}", site_packages.display());
        self.create_skeleton(&site_packages).await?;

        match request.pip_packages() {
            Some(packages) => {
                info!("Installing {} packages from pip", packages.len());
                self.install_packages(packages, &site_packages).await?;
            }
            None => debug!("No pip packages requested"),
        }

        match request.module_bundle_ref.as_deref() {
            Some(bundle_key) => {
                info!("Including module bundle: {}", bundle_key);
                self.merge_bundle(bundle_key, &site_packages).await?;
            }
            None => debug!("No module bundle requested"),
        }

        let archive_path = self.scratch_dir.join("layer.zip");
        archive::zip_directory(&work_dir, &archive_path)?;

        self.store
            .upload(&archive_path, &self.env.s3_bucket, &storage_key)
            .await?;

        Ok(BuildResponse {
            bucket: self.env.s3_bucket.clone(),
            key: storage_key,
        })
    }

    /// Create the layer directory layout, tolerating a pre-existing tree
    async fn create_skeleton(&self, site_packages: &Path) -> StrataResult<()> {
        fs::create_dir_all(site_packages)
            .await
            .map_err(|e| StrataError::io(format!("creating {}", site_packages.display()), e))
    }

    /// Write the requirements file and run the installer against it
    async fn install_packages(&self, packages: &[String], target: &Path) -> StrataResult<()> {
        let requirements_path = self.scratch_dir.join("requirements.txt");
        let requirements = format_requirements(packages);

        debug!("Writing requirements to {}", requirements_path.display());
        fs::write(&requirements_path, &requirements)
            .await
            .map_err(|e| {
                StrataError::io(format!("writing {}", requirements_path.display()), e)
            })?;

        self.installer.install(&requirements_path, target).await
    }

    /// Download the module bundle and extract it over the installed tree.
    ///
    /// Runs after pip install; colliding paths are silently overwritten
    /// by the bundle.
    async fn merge_bundle(&self, bundle_key: &str, site_packages: &Path) -> StrataResult<()> {
        let bundle_path = self.scratch_dir.join("module-bundle.zip");
        self.store
            .download(&self.env.s3_bucket, bundle_key, &bundle_path)
            .await?;
        archive::unzip(&bundle_path, site_packages)
    }
}
