//! # Issuance Request

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jose::PublicKeyJwk;
use crate::types::CredentialFormat;

/// A request for the issuer to prepare a credential for issuance and return
/// a credential offer.
///
/// The schema is pinned to a single server contract version: configuration
/// identifier and format as strings, issuer key as a JWK, subject claims as
/// a JSON object. No alternative payload shapes are attempted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IssuanceRequest {
    /// The configuration to issue against, selected from issuer metadata.
    pub credential_configuration_id: String,

    /// The credential format of the selected configuration.
    pub format: CredentialFormat,

    /// The key the issuer should sign the credential with.
    pub issuer_key: IssuerKey,

    /// Subject claims to populate the credential with.
    pub credential_data: Map<String, Value>,
}

/// Key material accompanying an issuance request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IssuerKey {
    /// Key representation. Always `jwk` for this client.
    #[serde(rename = "type")]
    pub type_: String,

    /// The key itself.
    pub jwk: PublicKeyJwk,
}

impl IssuerKey {
    /// Wrap a JWK as issuance-request key material.
    #[must_use]
    pub fn jwk(jwk: PublicKeyJwk) -> Self {
        Self { type_: "jwk".to_string(), jwk }
    }
}
