//! # End-to-End Flow
//!
//! Threads the steps strictly downward:
//!
//! ```text
//! DISCOVER → KEYGEN → ISSUE → RESOLVE_OFFER → EXCHANGE_CODE
//!     → [PROOF?] → FETCH_CREDENTIAL → START_VERIFY → DONE
//! ```
//!
//! Each step's input is the previous step's output; there is no shared
//! mutable state and the first failure aborts the run.

use serde_json::{Map, Value};

use crate::client::{IssuerClient, VerifierClient};
use crate::error::{Error, Failure, Result};
use crate::key::SigningKey;
use crate::types::{
    CredentialFormat, IssuedCredential, RequestedCredential, VerifyRequest, VerifySession,
};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct FlowReport {
    /// The issued credential, when the response shape was recognized.
    pub credential: Option<IssuedCredential>,

    /// The verification session descriptor the flow stopped at.
    pub verification: VerifySession,
}

impl FlowReport {
    /// Six-character prefix of the issued credential, for display.
    ///
    /// Counts characters, not bytes: compacted object payloads can carry
    /// multibyte claim data, so a byte slice could split a character.
    #[must_use]
    pub fn credential_prefix(&self) -> Option<&str> {
        self.credential.as_ref().map(|credential| {
            let s = credential.as_str();
            s.char_indices().nth(6).map_or(s, |(i, _)| &s[..i])
        })
    }
}

/// Run the issuance flow end to end, then open a verification session.
///
/// `subject_claims` populate the demo credential; `user_pin` is forwarded
/// to the token exchange when the offer requires one.
///
/// # Errors
///
/// Returns the first failing step's error; no step is retried and no
/// partial result is accumulated.
pub async fn run(
    issuer: &IssuerClient, verifier: &VerifierClient, format: &CredentialFormat,
    subject_claims: Map<String, Value>, user_pin: Option<&str>,
) -> Result<FlowReport> {
    // DISCOVER
    let metadata = issuer.discover().await?;
    tracing::info!(
        configurations = metadata.credential_configurations_supported.len(),
        "discovered issuer metadata"
    );

    // KEYGEN: independent issuer-side and holder-side identities
    let issuer_key = SigningKey::generate();
    let holder_key = SigningKey::generate();
    tracing::info!(issuer_kid = issuer_key.kid(), holder_kid = holder_key.kid(), "generated keys");

    // ISSUE
    let Some((configuration_id, configuration)) = metadata.select(format) else {
        return Err(Error::IssuanceRequest(Failure::new(
            "issuer supports no credential configurations",
        )));
    };
    let offer_ref = issuer
        .request_issuance(configuration_id, configuration, &issuer_key, subject_claims)
        .await?;
    tracing::info!("issuance accepted, offer reference: {offer_ref}");

    // RESOLVE_OFFER
    let offer = issuer.resolve_offer(&offer_ref).await?;

    // EXCHANGE_CODE: aborts before any network call when no usable grant
    let token = issuer.exchange_code(&offer, user_pin).await?;
    tracing::info!(proof_required = token.c_nonce.is_some(), "exchanged pre-authorized code");

    // [PROOF?] + FETCH_CREDENTIAL
    let response = issuer
        .fetch_credential(&token, configuration_id, configuration.format.clone(), &holder_key)
        .await?;
    let credential = match response.issued() {
        Ok(credential) => Some(credential),
        Err(e) => {
            // shape varies by server version; a soft warning, not a failure
            tracing::warn!("{e}");
            None
        }
    };

    // START_VERIFY: the flow stops at the session descriptor
    let request = VerifyRequest {
        request_credentials: vec![RequestedCredential {
            format: configuration.format.clone(),
            type_: configuration
                .types
                .last()
                .cloned()
                .unwrap_or_else(|| configuration_id.to_string()),
        }],
    };
    let verification = verifier.start_verification(&request).await?;

    Ok(FlowReport { credential, verification })
}
