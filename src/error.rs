//! # Flow Errors
//!
//! One error variant per flow step. Every failure is fatal — the flow never
//! retries a failed step (the offer resolver's bounded poll happens *inside*
//! the step, before it reports failure). Failures that originate from a
//! network call carry the HTTP status and response body for diagnosis.

use std::fmt;

use thiserror::Error;

/// Result type for the issuance flow.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal step failures, in flow order.
#[derive(Error, Debug)]
pub enum Error {
    /// Issuer metadata is unreachable or malformed.
    #[error("discovery: {0}")]
    Discovery(Failure),

    /// The issuer rejected the issuance payload, commonly a format or schema
    /// mismatch.
    #[error("issuance request: {0}")]
    IssuanceRequest(Failure),

    /// The offer reference carries neither an inline offer nor an
    /// indirection URI, or dereferencing exhausted its retry budget.
    #[error("offer resolution: {0}")]
    OfferResolution(Failure),

    /// No pre-authorized code was found in the offer, or the server rejected
    /// the code (consumed, expired, or malformed).
    #[error("token exchange: {0}")]
    TokenExchange(Failure),

    /// Signing failed while building the proof of possession.
    #[error("proof construction: {0}")]
    ProofConstruction(Failure),

    /// The server rejected the credential request, commonly a missing or
    /// invalid proof.
    #[error("credential fetch: {0}")]
    CredentialFetch(Failure),

    /// The verifier rejected the request to open a verification session.
    #[error("verification: {0}")]
    Verification(Failure),
}

impl Error {
    /// The HTTP status attached to the failure, if it came off the wire.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.failure().status
    }

    /// The step failure detail.
    #[must_use]
    pub const fn failure(&self) -> &Failure {
        match self {
            Self::Discovery(f)
            | Self::IssuanceRequest(f)
            | Self::OfferResolution(f)
            | Self::TokenExchange(f)
            | Self::ProofConstruction(f)
            | Self::CredentialFetch(f)
            | Self::Verification(f) => f,
        }
    }
}

/// Detail of a failed step.
#[derive(Debug, Default)]
pub struct Failure {
    detail: String,
    status: Option<u16>,
    body: Option<String>,
}

impl Failure {
    /// A failure with no HTTP context (client-side defect, signing error,
    /// malformed data).
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into(), status: None, body: None }
    }

    /// Capture the status and body of a non-success response.
    pub async fn from_response(detail: impl Into<String>, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self { detail: detail.into(), status: Some(status), body: Some(body) }
    }

    /// The HTTP status, when the failure came off the wire.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// The response body, when the failure came off the wire.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {status}")?;
            if let Some(body) = &self.body {
                write!(f, ": {body}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            detail: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            body: None,
        }
    }
}
