//! # Offer Resolver
//!
//! Dereferences an offer reference into a structured [`CredentialOffer`].
//! An inline `credential_offer` parameter is decoded directly; a
//! `credential_offer_uri` parameter is fetched with a bounded poll to
//! absorb read-after-write lag on a not-yet-consistent issuer.

use std::time::Duration;

use url::form_urlencoded;

use crate::client::IssuerClient;
use crate::error::{Error, Failure, Result};
use crate::types::CredentialOffer;

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

impl IssuerClient {
    /// Resolve an offer reference into a credential offer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OfferResolution`] when the reference carries neither
    /// an inline offer nor an indirection URI, when the inline offer is
    /// malformed, or when all fetch attempts are exhausted.
    pub async fn resolve_offer(&self, reference: &str) -> Result<CredentialOffer> {
        let query = reference.split_once('?').map_or(reference, |(_, q)| q);

        let mut inline = None;
        let mut by_ref = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "credential_offer" => inline = Some(value.into_owned()),
                "credential_offer_uri" => by_ref = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(json) = inline {
            return json.parse().map_err(|e: anyhow::Error| {
                Error::OfferResolution(Failure::new(format!("malformed inline offer: {e:#}")))
            });
        }
        let Some(uri) = by_ref else {
            return Err(Error::OfferResolution(Failure::new(
                "offer reference carries neither `credential_offer` nor `credential_offer_uri`",
            )));
        };

        self.fetch_offer(&uri).await
    }

    // Fixed attempt count, fixed delay. The offer may not be readable
    // immediately after issuance returns.
    async fn fetch_offer(&self, uri: &str) -> Result<CredentialOffer> {
        let mut last = Failure::new("offer fetch not attempted");

        for attempt in 1..=RETRY_ATTEMPTS {
            tracing::debug!("fetching offer (attempt {attempt}/{RETRY_ATTEMPTS}): {uri}");

            match self.http.get(uri).send().await {
                Ok(response) if response.status().is_success() => {
                    return response.json().await.map_err(|e| Error::OfferResolution(e.into()));
                }
                Ok(response) => {
                    last = Failure::from_response("offer endpoint returned an error", response)
                        .await;
                }
                Err(e) => last = e.into(),
            }

            if attempt < RETRY_ATTEMPTS {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        Err(Error::OfferResolution(last))
    }
}
