//! # Flow Types
//!
//! Request and response types for each step of the issuance flow. All are
//! created, threaded forward, and discarded within a single run — nothing is
//! mutated after creation.

mod credential;
mod credential_offer;
mod issuance;
mod metadata;
mod token;
mod verification;

pub use self::credential::*;
pub use self::credential_offer::*;
pub use self::issuance::*;
pub use self::metadata::*;
pub use self::token::*;
pub use self::verification::*;
