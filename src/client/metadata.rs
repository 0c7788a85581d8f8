//! # Config Discoverer
//!
//! Fetches issuer metadata from the well-known endpoint. Discovery runs once
//! per flow; a failure here is fatal and is not retried.

use crate::client::IssuerClient;
use crate::error::{Error, Failure, Result};
use crate::types::IssuerMetadata;

impl IssuerClient {
    /// Retrieve the issuer's supported credential configurations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Discovery`] when the endpoint is unreachable,
    /// returns a non-success status, or the body does not parse.
    pub async fn discover(&self) -> Result<IssuerMetadata> {
        let uri = self.versioned(".well-known/openid-credential-issuer");
        tracing::debug!("discovering issuer metadata: {uri}");

        let response =
            self.http.get(&uri).send().await.map_err(|e| Error::Discovery(e.into()))?;
        if !response.status().is_success() {
            return Err(Error::Discovery(
                Failure::from_response("issuer metadata endpoint returned an error", response)
                    .await,
            ));
        }

        response.json().await.map_err(|e| Error::Discovery(e.into()))
    }
}
