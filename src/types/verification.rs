//! # Verification Session

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::CredentialFormat;

/// Request to open a verification session, declaring the credential formats
/// and types the verifier should ask for.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VerifyRequest {
    /// The credentials to request in the presentation.
    pub request_credentials: Vec<RequestedCredential>,
}

/// One credential the verifier should request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RequestedCredential {
    /// Credential format.
    pub format: CredentialFormat,

    /// Credential type name. Pinned to the string form of the contract.
    #[serde(rename = "type")]
    pub type_: String,
}

/// A verification session descriptor: a URL for the wallet to follow, or an
/// inline session object, depending on the verifier version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifySession {
    /// Session URL.
    Url(String),
    /// Inline JSON session descriptor.
    Object(Value),
}

impl VerifySession {
    /// Classify a verifier response body. The `Url` arm is reserved for
    /// JSON-string and plain-text bodies; any other JSON value (array,
    /// number) is kept as [`Self::Object`] so a malformed response stays
    /// visible in the reported descriptor instead of masquerading as a URL.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::String(url)) => Self::Url(url),
            Ok(value) => Self::Object(value),
            Err(_) => Self::Url(body.trim().to_string()),
        }
    }
}
