//! # Issuance Requester
//!
//! Submits an issuance request for a selected credential configuration and
//! returns the offer reference the issuer responds with.

use serde_json::{Map, Value};

use crate::client::IssuerClient;
use crate::error::{Error, Failure, Result};
use crate::key::SigningKey;
use crate::types::{CredentialConfiguration, IssuanceRequest, IssuerKey};

impl IssuerClient {
    /// Request issuance of a credential populated with `subject_claims`,
    /// signed by the issuer under `issuer_key`'s public key.
    ///
    /// The returned string is an offer reference: a URL carrying either an
    /// inline `credential_offer` or a `credential_offer_uri` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IssuanceRequest`] with the server's status and body
    /// on rejection. Not retried: a rejected issuance may have mutated
    /// server state, so blind resubmission is unsafe.
    pub async fn request_issuance(
        &self, configuration_id: &str, configuration: &CredentialConfiguration,
        issuer_key: &SigningKey, subject_claims: Map<String, Value>,
    ) -> Result<String> {
        let request = IssuanceRequest {
            credential_configuration_id: configuration_id.to_string(),
            format: configuration.format.clone(),
            issuer_key: IssuerKey::jwk(issuer_key.public_jwk()),
            credential_data: subject_claims,
        };

        let uri = format!("{}/openid4vc/jwt/issue", self.base);
        tracing::debug!("requesting issuance of `{configuration_id}`: {uri}");

        let response = self
            .http
            .post(&uri)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::IssuanceRequest(e.into()))?;
        if !response.status().is_success() {
            return Err(Error::IssuanceRequest(
                Failure::from_response("issuer rejected the issuance payload", response).await,
            ));
        }

        // the offer reference arrives as a bare (possibly quoted) string
        let body = response.text().await.map_err(|e| Error::IssuanceRequest(e.into()))?;
        Ok(body.trim().trim_matches('"').to_string())
    }
}
