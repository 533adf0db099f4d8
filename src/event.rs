//! Invocation payload types
//!
//! A build request arrives as the Lambda event; the response is returned
//! to the invoker with the S3 location of the published layer.

use crate::error::{StrataError, StrataResult};
use serde::{Deserialize, Serialize};

/// Incoming layer build request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildRequest {
    /// Name of the layer to build
    pub layer_name: Option<String>,

    /// Pip packages to install, in requirements.txt syntax
    pub pip_packages: Option<Vec<String>>,

    /// S3 key of a zip bundle of custom modules to merge into the layer
    pub module_bundle_ref: Option<String>,
}

impl BuildRequest {
    /// Validate the request and return the layer name.
    ///
    /// At least one content source (`pip_packages` or `module_bundle_ref`)
    /// must be present; an empty package list counts as absent.
    pub fn validate(&self) -> StrataResult<&str> {
        let name = self
            .layer_name
            .as_deref()
            .ok_or(StrataError::MissingField("layer_name"))?;

        if self.pip_packages().is_none() && self.module_bundle_ref.is_none() {
            return Err(StrataError::MissingField(
                "pip_packages or module_bundle_ref",
            ));
        }

        Ok(name)
    }

    /// Packages to install, or `None` when the list is absent or empty
    pub fn pip_packages(&self) -> Option<&[String]> {
        self.pip_packages.as_deref().filter(|p| !p.is_empty())
    }
}

/// Location of the published layer archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResponse {
    /// Bucket holding the archive
    #[serde(rename = "S3Bucket")]
    pub bucket: String,

    /// Key of the archive within the bucket
    #[serde(rename = "S3Key")]
    pub key: String,
}
