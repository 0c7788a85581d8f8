//! # JOSE Support
//!
//! Just enough JWS to construct the Wallet's proof-of-possession JWT: a
//! protected header carrying the holder's public key, a compact
//! serialization, and an Ed25519 signature. Verification is owned by the
//! issuer; this module only signs.

use anyhow::{Context as _, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::key::SigningKey;

/// The JWT `typ` header parameter.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum JwtType {
    /// General purpose JWT.
    #[default]
    #[serde(rename = "jwt")]
    Jwt,

    /// Wallet proof of possession of key material.
    #[serde(rename = "openid4vci-proof+jwt")]
    ProofJwt,
}

/// A public key in JWK form. Only Ed25519 (`OKP`/`Ed25519`) keys are
/// produced by this crate.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwk {
    /// Key type, e.g. `OKP`.
    pub kty: String,

    /// Curve name, e.g. `Ed25519`.
    pub crv: String,

    /// Base64url-encoded public key bytes.
    pub x: String,

    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Intended signature algorithm, e.g. `EdDSA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

/// The protected header of a compact JWS.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Protected {
    /// Signature algorithm.
    pub alg: String,

    /// Payload type marker.
    pub typ: JwtType,

    /// The signer's public key, embedded so the receiver can verify without
    /// key resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwk: Option<PublicKeyJwk>,
}

/// Sign `claims` under `key` into a compact JWS
/// (`base64url(header).base64url(payload).base64url(signature)`).
///
/// # Errors
///
/// Returns an error if the header or claims cannot be serialized to JSON.
pub fn sign<T: Serialize>(protected: &Protected, claims: &T, key: &SigningKey) -> Result<String> {
    let header = serde_json::to_vec(protected).context("serializing protected header")?;
    let payload = serde_json::to_vec(claims).context("serializing claims")?;

    let signing_input = format!(
        "{}.{}",
        Base64UrlUnpadded::encode_string(&header),
        Base64UrlUnpadded::encode_string(&payload)
    );
    let signature = key.sign(signing_input.as_bytes());

    Ok(format!("{signing_input}.{}", Base64UrlUnpadded::encode_string(&signature)))
}
