use std::fmt;

use bon::Builder;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Kind of registry document. The API currently accepts only goods introduction.
#[non_exhaustive]
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocType {
    #[default]
    LpIntroduceGoods,
}

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "participantInn")]
    pub participant_inn: String,
}

impl Description {
    pub fn new<S: Into<String>>(participant_inn: S) -> Self {
        Self {
            participant_inn: participant_inn.into(),
        }
    }
}

/// One product line of a [`Document`].
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Product {
    pub certificate_document: String,
    #[serde(with = "crate::serde_helpers::calendar_date")]
    pub certificate_document_date: NaiveDate,
    pub certificate_document_number: String,
    pub owner_inn: String,
    pub producer_inn: String,
    #[serde(with = "crate::serde_helpers::calendar_date")]
    pub production_date: NaiveDate,
    pub tnved_code: String,
    pub uit_code: String,
    pub uitu_code: String,
}

/// Goods introduction document submitted to the registry.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Document {
    pub description: Description,
    pub doc_id: String,
    pub doc_status: String,
    #[builder(default)]
    pub doc_type: DocType,
    #[serde(rename = "importRequest")]
    #[builder(default)]
    pub import_request: bool,
    pub owner_inn: String,
    #[serde(with = "crate::serde_helpers::calendar_date")]
    pub production_date: NaiveDate,
    pub production_type: String,
    #[builder(default)]
    pub products: Vec<Product>,
    #[serde(with = "crate::serde_helpers::calendar_date")]
    pub reg_date: NaiveDate,
    pub reg_number: String,
}

/// Body returned by the registry's create endpoint.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Outcome of one submission. A submission either fully succeeds or fully fails.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionResult {
    Created { document_id: String },
    Failed(SubmissionFailure),
}

impl SubmissionResult {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, SubmissionResult::Created { .. })
    }

    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        match self {
            SubmissionResult::Created { document_id } => Some(document_id),
            SubmissionResult::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match self {
            SubmissionResult::Created { .. } => None,
            SubmissionResult::Failed(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<String, SubmissionFailure> {
        match self {
            SubmissionResult::Created { document_id } => Ok(document_id),
            SubmissionResult::Failed(failure) => Err(failure),
        }
    }
}

impl From<DocumentResponse> for SubmissionResult {
    fn from(response: DocumentResponse) -> Self {
        match response.value {
            Some(document_id) => SubmissionResult::Created { document_id },
            None => SubmissionResult::Failed(SubmissionFailure::Rejected {
                error_code: response.error_code,
                error_message: response.error_message,
                error_description: response.error_description,
            }),
        }
    }
}

/// Why a submission did not produce a document id.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionFailure {
    /// The payload could not be serialized; nothing was sent.
    Encoding { message: String },
    /// No HTTP response was received.
    Transport { message: String },
    /// The registry answered with a status other than `200 OK`.
    Connectivity { status: StatusCode },
    /// `200 OK` with a body that does not match the response schema.
    MalformedResponse { message: String },
    /// `200 OK` without a document id, with whatever error detail the registry sent.
    Rejected {
        error_code: Option<String>,
        error_message: Option<String>,
        error_description: Option<String>,
    },
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionFailure::Encoding { message } => {
                write!(f, "failed to encode document: {message}")
            }
            SubmissionFailure::Transport { message } => {
                write!(f, "connection error: {message}")
            }
            SubmissionFailure::Connectivity { status } => {
                write!(f, "connection error: registry responded with {status}")
            }
            SubmissionFailure::MalformedResponse { message } => {
                write!(f, "unreadable registry response: {message}")
            }
            SubmissionFailure::Rejected {
                error_code,
                error_message,
                error_description,
            } => {
                f.write_str("document creation error")?;
                if let Some(code) = error_code {
                    write!(f, " [{code}]")?;
                }
                for detail in [error_message, error_description].into_iter().flatten() {
                    write!(f, ": {detail}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SubmissionFailure {}
