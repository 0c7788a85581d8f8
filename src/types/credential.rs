//! # Credential Request & Response

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::CredentialFormat;

/// Claims bound by the Wallet's proof-of-possession JWT.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProofClaims {
    /// The credential issuer endpoint the proof is intended for.
    pub aud: String,

    /// Unix timestamp the proof was issued at.
    pub iat: i64,

    /// The server-supplied `c_nonce`, copied verbatim. A mismatched nonce is
    /// for the server to reject, never for the client to correct.
    pub nonce: String,
}

/// Proof of possession attached to a credential request.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "proof_type", rename_all = "lowercase")]
pub enum Proof {
    /// A signed JWT binding the holder's key to the server nonce.
    Jwt {
        /// The compact-serialized JWT.
        jwt: String,
    },
}

/// Request to the issuer's credential endpoint, bearer-authenticated with
/// the access token from the code exchange.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CredentialRequest {
    /// The configuration the access token was issued for.
    pub credential_configuration_id: String,

    /// The credential format to issue.
    pub format: CredentialFormat,

    /// Proof of possession. Attached iff the token response carried a
    /// `c_nonce`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

/// Credential endpoint response. The field carrying the credential varies by
/// server version, so all known names are modelled and extraction is
/// explicit.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialResponse {
    /// Current servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<Value>,

    /// Older servers returning the raw JWT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<Value>,

    /// Oldest servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vc: Option<Value>,
}

impl CredentialResponse {
    /// Extract the issued credential, tagged by the field that carried it.
    ///
    /// # Errors
    ///
    /// Returns [`UnrecognizedShape`] when none of the known fields is
    /// populated. Callers decide severity: the flow downgrades this to a
    /// warning since the response shape varies by server version.
    pub fn issued(&self) -> Result<IssuedCredential, UnrecognizedShape> {
        if let Some(value) = &self.credential {
            return Ok(IssuedCredential::Credential(text_of(value)));
        }
        if let Some(value) = &self.jwt {
            return Ok(IssuedCredential::Jwt(text_of(value)));
        }
        if let Some(value) = &self.vc {
            return Ok(IssuedCredential::Vc(text_of(value)));
        }
        Err(UnrecognizedShape)
    }
}

// String payloads pass through untouched; object payloads are compacted to
// JSON text.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The issued credential, tagged by the response field that carried it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssuedCredential {
    /// Returned under the `credential` key.
    Credential(String),
    /// Returned under the `jwt` key.
    Jwt(String),
    /// Returned under the `vc` key.
    Vc(String),
}

impl IssuedCredential {
    /// The credential text, whichever field carried it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Credential(s) | Self::Jwt(s) | Self::Vc(s) => s,
        }
    }
}

/// No known credential-bearing field was populated in the response.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized credential response shape: none of `credential`, `jwt`, `vc` is present")]
pub struct UnrecognizedShape;
