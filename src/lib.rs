//! # OpenID4VCI Holder Flow
//!
//! A holder-side client for the [OpenID for Verifiable Credential Issuance]
//! pre-authorized code flow. The crate walks the full sequence against an
//! external issuer deployment — metadata discovery, issuance request, offer
//! resolution, pre-authorized code exchange, proof of possession, and
//! credential retrieval — then opens (but does not complete) a verification
//! session with a verifier deployment.
//!
//! Execution is strictly sequential: each step's input is the previous
//! step's output, and the first failure aborts the run. The only retry
//! behavior is the offer resolver's bounded poll, which absorbs
//! read-after-write lag on the issuer side.
//!
//! [OpenID for Verifiable Credential Issuance]: https://openid.net/specs/openid-4-verifiable-credential-issuance-1_0.html

pub mod client;
pub mod flow;
pub mod types;

mod error;
mod jose;
mod key;
mod urlencode;

pub use self::client::{IssuerClient, VerifierClient, build_proof};
pub use self::error::{Error, Failure, Result};
pub use self::jose::{JwtType, PublicKeyJwk};
pub use self::key::SigningKey;
