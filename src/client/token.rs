//! # Code Exchanger
//!
//! Trades an offer's pre-authorized code for a bearer access token. Codes
//! are single-use, so a rejected exchange is fatal.

use crate::client::IssuerClient;
use crate::error::{Error, Failure, Result};
use crate::types::{CredentialOffer, TokenRequest, TokenResponse};

impl IssuerClient {
    /// Exchange the offer's pre-authorized code for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenExchange`] before any network call when the
    /// offer carries no pre-authorized code (a client-side defect), or with
    /// the server's status and body when the exchange is rejected.
    pub async fn exchange_code(
        &self, offer: &CredentialOffer, user_pin: Option<&str>,
    ) -> Result<TokenResponse> {
        let Some(grant) = offer.pre_authorized_code() else {
            return Err(Error::TokenExchange(Failure::new(
                "offer grants do not include a pre-authorized code",
            )));
        };
        let request = TokenRequest::pre_authorized(&grant.pre_authorized_code, user_pin);

        let uri = self.versioned("token");
        tracing::debug!("exchanging pre-authorized code: {uri}");

        let response = self
            .http
            .post(&uri)
            .form(&request)
            .send()
            .await
            .map_err(|e| Error::TokenExchange(e.into()))?;
        if !response.status().is_success() {
            return Err(Error::TokenExchange(
                Failure::from_response("token endpoint rejected the code", response).await,
            ));
        }

        response.json().await.map_err(|e| Error::TokenExchange(e.into()))
    }
}
