//! # Flow Clients
//!
//! HTTP clients for the issuer and verifier deployments. Both take the HTTP
//! client as an explicit dependency (there is no process-wide singleton) and
//! each flow step is a method that blocks on its outbound call before the
//! next step begins.

mod credential;
mod issuance;
mod metadata;
mod offer;
mod proof;
mod token;
mod verify;

pub use self::proof::build_proof;

/// Client bound to one issuer deployment.
#[derive(Clone, Debug)]
pub struct IssuerClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base: String,
    pub(crate) version: String,
}

impl IssuerClient {
    /// Bind a client to an issuer base URL and API version segment.
    #[must_use]
    pub fn new(http: reqwest::Client, base: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
            version: version.into(),
        }
    }

    /// The issuer base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn versioned(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.base, self.version)
    }
}

/// Client bound to one verifier deployment.
#[derive(Clone, Debug)]
pub struct VerifierClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base: String,
}

impl VerifierClient {
    /// Bind a client to a verifier base URL.
    #[must_use]
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self { http, base: base.into().trim_end_matches('/').to_string() }
    }
}
