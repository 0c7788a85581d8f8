//! # Proof Builder
//!
//! Builds the signed proof of possession demanded when a token response
//! carries a `c_nonce`. The proof binds the issuer endpoint, the issue
//! time, and the server nonce under the holder's key.

use chrono::Utc;

use crate::error::{Error, Failure, Result};
use crate::jose::{self, JwtType, Protected};
use crate::key::SigningKey;
use crate::types::{Proof, ProofClaims};

/// Build a proof-of-possession JWT for `holder_key`, bound to the
/// server-supplied `nonce`.
///
/// The nonce is copied verbatim — a mismatch must be rejected by the
/// server, not silently corrected here.
///
/// # Errors
///
/// Returns [`Error::ProofConstruction`] when signing fails.
pub fn build_proof(issuer: &str, nonce: &str, holder_key: &SigningKey) -> Result<Proof> {
    let protected = Protected {
        alg: SigningKey::ALGORITHM.to_string(),
        typ: JwtType::ProofJwt,
        jwk: Some(holder_key.public_jwk()),
    };
    let claims = ProofClaims {
        aud: issuer.to_string(),
        iat: Utc::now().timestamp(),
        nonce: nonce.to_string(),
    };

    let jwt = jose::sign(&protected, &claims, holder_key)
        .map_err(|e| Error::ProofConstruction(Failure::new(format!("{e:#}"))))?;

    Ok(Proof::Jwt { jwt })
}
