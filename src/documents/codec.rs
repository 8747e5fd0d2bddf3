//! JSON wire format of the create-document endpoint.

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::Result;
use crate::documents::types::{Document, DocumentResponse};

/// `{document, signature}` envelope, built per call and dropped once encoded.
#[derive(Debug, Serialize)]
pub struct SubmissionRequest<'doc> {
    pub document: &'doc Document,
    #[serde(serialize_with = "expose_signature")]
    pub signature: &'doc SecretString,
}

impl<'doc> SubmissionRequest<'doc> {
    #[must_use]
    pub fn new(document: &'doc Document, signature: &'doc SecretString) -> Self {
        Self {
            document,
            signature,
        }
    }
}

fn expose_signature<S: Serializer>(
    signature: &&SecretString,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(signature.expose_secret())
}

#[derive(Deserialize)]
struct OwnedSubmissionRequest {
    document: Document,
    signature: SecretString,
}

/// Serializes the envelope into the request body.
pub fn encode_request(request: &SubmissionRequest<'_>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(request)?)
}

/// Parses a request body back into its document and signature.
pub fn decode_request(body: &[u8]) -> Result<(Document, SecretString)> {
    let request: OwnedSubmissionRequest = crate::serde_helpers::from_slice(body)?;
    Ok((request.document, request.signature))
}

/// Parses the registry's reply. A blank body carries no identifier.
pub fn decode_response(body: &[u8]) -> Result<DocumentResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DocumentResponse::default());
    }
    crate::serde_helpers::from_slice(body)
}
