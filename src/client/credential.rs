//! # Credential Fetcher
//!
//! Redeems the access token (plus proof, when one was demanded) for the
//! final signed credential.

use crate::client::{IssuerClient, proof};
use crate::error::{Error, Failure, Result};
use crate::key::SigningKey;
use crate::types::{CredentialFormat, CredentialRequest, CredentialResponse, TokenResponse};

impl IssuerClient {
    /// Request the credential the access token was issued for.
    ///
    /// A proof of possession is built and attached iff the token response
    /// carried a `c_nonce`; its absence means the server does not require
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProofConstruction`] if signing fails, or
    /// [`Error::CredentialFetch`] with the server's status and body on
    /// rejection (commonly a missing or invalid proof).
    pub async fn fetch_credential(
        &self, token: &TokenResponse, configuration_id: &str, format: CredentialFormat,
        holder_key: &SigningKey,
    ) -> Result<CredentialResponse> {
        let proof = match &token.c_nonce {
            Some(nonce) => Some(proof::build_proof(&self.base, nonce, holder_key)?),
            None => None,
        };
        let request = CredentialRequest {
            credential_configuration_id: configuration_id.to_string(),
            format,
            proof,
        };

        let uri = self.versioned("credential");
        tracing::debug!("fetching credential: {uri}");

        let response = self
            .http
            .post(&uri)
            .bearer_auth(&token.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::CredentialFetch(e.into()))?;
        if !response.status().is_success() {
            return Err(Error::CredentialFetch(
                Failure::from_response("credential endpoint rejected the request", response).await,
            ));
        }

        response.json().await.map_err(|e| Error::CredentialFetch(e.into()))
    }
}
