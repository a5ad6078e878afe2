//! Reqwest-based client for the Azure Read API.
//!
//! This module provides a reqwest-based implementation of the [`ReadProvider`] trait.
//!
//! [`ReadProvider`]: visionread_core::ReadProvider

mod config;
mod read_client;

pub use config::{AzureConfig, DEFAULT_TIMEOUT_SECS};
pub use read_client::{AzureReadClient, OPERATION_LOCATION};
