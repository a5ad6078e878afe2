#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod read;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use read::{
    AnalysisRequest, OperationId, OperationLocation, OperationResult, OperationStatus, Page,
    PollPolicy, ReadProvider, ReadService, TextLine, Word,
};
