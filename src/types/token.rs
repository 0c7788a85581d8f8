//! # Token Exchange

use serde::{Deserialize, Serialize};

/// Form body for the token exchange, as defined in [RFC6749] with the
/// pre-authorized code extension.
///
/// [RFC6749]: https://www.rfc-editor.org/rfc/rfc6749.html
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenRequest {
    /// The OAuth grant type. Always the pre-authorized code URN for this
    /// client.
    pub grant_type: String,

    /// The code from the credential offer.
    #[serde(rename = "pre-authorized_code")]
    pub pre_authorized_code: String,

    /// User PIN, when the offer flagged one as required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pin: Option<String>,
}

impl TokenRequest {
    /// The standard OAuth pre-authorized code grant type.
    pub const PRE_AUTHORIZED_GRANT: &'static str =
        "urn:ietf:params:oauth:grant-type:pre-authorized_code";

    /// Build a pre-authorized code exchange request.
    #[must_use]
    pub fn pre_authorized(code: impl Into<String>, user_pin: Option<&str>) -> Self {
        Self {
            grant_type: Self::PRE_AUTHORIZED_GRANT.to_string(),
            pre_authorized_code: code.into(),
            user_pin: user_pin.map(ToString::to_string),
        }
    }
}

/// Token endpoint response.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenResponse {
    /// Bearer token for the credential endpoint.
    pub access_token: String,

    /// Anti-replay nonce. When present, the credential request must carry a
    /// signed proof of possession binding this nonce; when absent, no proof
    /// is required. A conditional branch, not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_nonce: Option<String>,

    /// Token type, nominally `Bearer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Access token lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}
