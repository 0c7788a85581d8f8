//! # Signing Keys
//!
//! Ephemeral Ed25519 key pairs representing the issuer and holder identities
//! for a demo run. Keys live in memory only and are discarded at process end.

use base64ct::{Base64UrlUnpadded, Encoding};
use ed25519_dalek::Signer as _;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::jose::PublicKeyJwk;

/// An asymmetric signing key with a public identifier and declared algorithm.
///
/// Two independent instances exist per run — one issuer-side, one
/// holder-side — each exclusively owned by the step that created it and
/// passed by reference to later steps.
pub struct SigningKey {
    secret: ed25519_dalek::SigningKey,
    kid: String,
}

impl SigningKey {
    /// The signature algorithm declared in proof headers.
    pub const ALGORITHM: &'static str = "EdDSA";

    /// Generate a fresh key pair with a new unique key identifier.
    ///
    /// The identifier is a freshly generated UUID so that signatures are
    /// never misattributed across runs.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            secret: ed25519_dalek::SigningKey::generate(&mut OsRng),
            kid: Uuid::new_v4().to_string(),
        }
    }

    /// The public key identifier.
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Export the public half as a JWK.
    #[must_use]
    pub fn public_jwk(&self) -> PublicKeyJwk {
        PublicKeyJwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: Base64UrlUnpadded::encode_string(self.secret.verifying_key().as_bytes()),
            kid: Some(self.kid.clone()),
            alg: Some(Self::ALGORITHM.to_string()),
        }
    }

    /// Sign a message, returning the raw signature bytes.
    #[must_use]
    pub fn sign(&self, msg: &[u8]) -> Vec<u8> {
        self.secret.sign(msg).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").field("kid", &self.kid).finish_non_exhaustive()
    }
}
