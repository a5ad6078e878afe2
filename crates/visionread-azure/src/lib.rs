#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod models;

pub use crate::client::{AzureConfig, AzureReadClient, DEFAULT_TIMEOUT_SECS, OPERATION_LOCATION};
pub use crate::error::{Error, Result};

/// Tracing target for Azure client operations.
pub const TRACING_TARGET: &str = "visionread_azure::client";
