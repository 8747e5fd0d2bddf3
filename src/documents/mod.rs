//! Registry document submission.
//!
//! - build a [`Document`] (with its [`Product`] lines)
//! - submit it with a caller-produced detached signature
//! - every call first takes a permit from the client's [`RateLimiter`](crate::rate_limit::RateLimiter)

mod client;
pub mod codec;
mod config;
mod types;

pub use client::DocumentsClient;
pub use config::{DEFAULT_ENDPOINT, DocumentsConfig, RawRateLimitConfig, TimeUnit};
pub use types::{
    Description, DocType, Document, DocumentResponse, Product, SubmissionFailure,
    SubmissionResult,
};
