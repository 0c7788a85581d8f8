//! # Verification Initiator
//!
//! Opens a verification session by declaring the desired credential format
//! and type. The flow deliberately stops once the session descriptor is
//! returned: building and submitting the verifiable presentation is out of
//! scope for this client.

use crate::client::VerifierClient;
use crate::error::{Error, Failure, Result};
use crate::types::{VerifyRequest, VerifySession};

impl VerifierClient {
    /// Open a verification session with the verifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Verification`] with the server's status and body
    /// when the verifier rejects the request.
    pub async fn start_verification(&self, request: &VerifyRequest) -> Result<VerifySession> {
        let uri = format!("{}/openid4vc/verify", self.base);
        tracing::debug!("opening verification session: {uri}");

        let response = self
            .http
            .post(&uri)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Verification(e.into()))?;
        if !response.status().is_success() {
            return Err(Error::Verification(
                Failure::from_response("verifier rejected the session request", response).await,
            ));
        }

        let body = response.text().await.map_err(|e| Error::Verification(e.into()))?;
        Ok(VerifySession::from_body(&body))
    }
}
