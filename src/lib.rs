//! Client for the CRPT goods registry document API.
//!
//! Submissions go through a process-local fixed-window [`rate_limit::RateLimiter`]:
//! no more than the configured number of calls reach the registry per time unit,
//! however many tasks submit concurrently.
//!
//! ```no_run
//! # async fn run() -> crpt_api_client::Result<()> {
//! use chrono::NaiveDate;
//! use crpt_api_client::documents::{
//!     Description, Document, DocumentsClient, DocumentsConfig, SubmissionResult, TimeUnit,
//! };
//! use secrecy::SecretString;
//!
//! let client = DocumentsClient::new(DocumentsConfig::production(TimeUnit::Seconds, 10)?)?;
//! let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap_or_default();
//! let document = Document::builder()
//!     .description(Description::new("7701234567"))
//!     .doc_id("doc-1")
//!     .doc_status("NEW")
//!     .owner_inn("7701234567")
//!     .production_date(today)
//!     .production_type("OWN_PRODUCTION")
//!     .reg_date(today)
//!     .reg_number("R-1")
//!     .build();
//!
//! match client.create_document(&document, &SecretString::from("signature")).await {
//!     SubmissionResult::Created { document_id } => println!("created {document_id}"),
//!     SubmissionResult::Failed(failure) => eprintln!("{failure}"),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod documents;
pub mod error;
pub mod rate_limit;
pub mod serde_helpers;
pub mod transport;

pub type Result<T> = std::result::Result<T, error::Error>;
