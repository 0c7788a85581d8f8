//! # Credential Offer

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::urlencode;

/// A Credential Offer describing what credentials are available and how to
/// obtain them.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CredentialOffer {
    /// The URL of the Credential Issuer the Wallet can use to obtain the
    /// offered credentials.
    pub credential_issuer: String,

    /// Identifiers of entries in the issuer's
    /// `credential_configurations_supported` metadata.
    pub credential_configuration_ids: Vec<String>,

    /// Grant types the issuer is prepared to process for this offer. Exactly
    /// one grant type is usable per offer; the flow selects whichever is
    /// present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grants: Option<Grants>,
}

impl CredentialOffer {
    /// The pre-authorized code grant, if the offer carries one.
    #[must_use]
    pub fn pre_authorized_code(&self) -> Option<&PreAuthorizedCodeGrant> {
        self.grants.as_ref().and_then(|grants| grants.pre_authorized_code.as_ref())
    }

    /// Embed the offer in an offer-reference URL as an inline
    /// `credential_offer` query parameter.
    #[must_use]
    pub fn to_offer_uri(&self, endpoint: &str) -> String {
        format!("{endpoint}?credential_offer={self}")
    }
}

/// Percent-encoded JSON, the inline query-parameter form.
impl Display for CredentialOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = urlencode::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

impl FromStr for CredentialOffer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        urlencode::from_str(s)
    }
}

/// Grant types offered to the Wallet.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Grants {
    /// Authorization Code grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeGrant>,

    /// Pre-Authorized Code grant. Serialized under the standard grant-type
    /// URN; the legacy short key used by older issuer versions is accepted
    /// on input.
    #[serde(rename = "urn:ietf:params:oauth:grant-type:pre-authorized_code")]
    #[serde(alias = "pre_authorized_code")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_authorized_code: Option<PreAuthorizedCodeGrant>,
}

/// Parameters of the Authorization Code grant. The demo flow does not use
/// this grant; it is parsed only so its presence is visible.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthorizationCodeGrant {
    /// Links an Authorization Request back to the offer context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_state: Option<String>,
}

/// Parameters of the Pre-Authorized Code grant.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PreAuthorizedCodeGrant {
    /// Short-lived, single-use code exchanged for an access token. Both the
    /// hyphenated spelling and the legacy underscore spelling are accepted
    /// on input.
    #[serde(rename = "pre-authorized_code")]
    #[serde(alias = "pre_authorized_code")]
    pub pre_authorized_code: String,

    /// Whether the token endpoint expects a user PIN with this code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pin_required: Option<bool>,
}
