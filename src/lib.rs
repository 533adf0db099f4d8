//! Strata - AWS Lambda layer builder
//!
//! Installs pip packages and/or merges a custom module bundle into the
//! standard layer layout, zips the tree, and publishes it to S3.

pub mod archive;
pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod installer;
pub mod storage;

pub use error::{StrataError, StrataResult};
