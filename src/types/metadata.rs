//! # Issuer Metadata

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credential Issuer metadata, retrieved once per run from the issuer's
/// well-known endpoint and treated as immutable thereafter.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IssuerMetadata {
    /// The URL of the Credential Issuer.
    pub credential_issuer: String,

    /// URL of the issuer's Credential endpoint, when advertised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_endpoint: Option<String>,

    /// Credential configurations the issuer supports, keyed by configuration
    /// identifier. A `BTreeMap` so that "first entry" is deterministic.
    pub credential_configurations_supported: BTreeMap<String, CredentialConfiguration>,
}

impl IssuerMetadata {
    /// Select a credential configuration: the first entry whose format
    /// matches `format`, else the first entry overall. Returns `None` only
    /// when the issuer advertises no configurations at all.
    #[must_use]
    pub fn select(&self, format: &CredentialFormat) -> Option<(&str, &CredentialConfiguration)> {
        let supported = &self.credential_configurations_supported;
        supported
            .iter()
            .find(|(_, config)| &config.format == format)
            .or_else(|| supported.iter().next())
            .map(|(id, config)| (id.as_str(), config))
    }
}

/// A single supported credential configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialConfiguration {
    /// The credential format the configuration produces.
    pub format: CredentialFormat,

    /// Credential type names, most general first, e.g.
    /// `["VerifiableCredential", "UniversityDegree"]`. Always an array; the
    /// issuance contract is pinned to the array form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// Claim descriptions for the credential subject.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub claims: Map<String, Value>,
}

/// Credential formats the demo can request.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum CredentialFormat {
    /// A JWT-encoded W3C Verifiable Credential.
    #[default]
    #[serde(rename = "jwt_vc_json")]
    JwtVcJson,

    /// An ISO 18013-5 mobile document.
    #[serde(rename = "mso_mdoc")]
    MsoMdoc,

    /// A selectively-disclosable JWT credential.
    #[serde(rename = "vc+sd-jwt")]
    SdJwt,
}

impl Display for CredentialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JwtVcJson => write!(f, "jwt_vc_json"),
            Self::MsoMdoc => write!(f, "mso_mdoc"),
            Self::SdJwt => write!(f, "vc+sd-jwt"),
        }
    }
}

impl FromStr for CredentialFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jwt_vc_json" => Ok(Self::JwtVcJson),
            "mso_mdoc" => Ok(Self::MsoMdoc),
            "vc+sd-jwt" => Ok(Self::SdJwt),
            _ => Err(anyhow::anyhow!("unknown credential format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> IssuerMetadata {
        let mut supported = BTreeMap::new();
        supported.insert("a-degree-sdjwt".to_string(), CredentialConfiguration {
            format: CredentialFormat::SdJwt,
            ..CredentialConfiguration::default()
        });
        supported.insert("b-degree-jwt".to_string(), CredentialConfiguration {
            format: CredentialFormat::JwtVcJson,
            ..CredentialConfiguration::default()
        });
        supported.insert("c-degree-jwt".to_string(), CredentialConfiguration {
            format: CredentialFormat::JwtVcJson,
            ..CredentialConfiguration::default()
        });
        IssuerMetadata {
            credential_issuer: "https://issuer.example.com".to_string(),
            credential_endpoint: None,
            credential_configurations_supported: supported,
        }
    }

    #[test]
    fn select_first_matching_format() {
        let metadata = metadata();
        let (id, config) =
            metadata.select(&CredentialFormat::JwtVcJson).expect("should select");
        assert_eq!(id, "b-degree-jwt");
        assert_eq!(config.format, CredentialFormat::JwtVcJson);
    }

    #[test]
    fn select_falls_back_to_first_entry() {
        let metadata = metadata();
        let (id, _) = metadata.select(&CredentialFormat::MsoMdoc).expect("should select");
        assert_eq!(id, "a-degree-sdjwt");
    }

    #[test]
    fn select_none_when_empty() {
        let metadata = IssuerMetadata::default();
        assert!(metadata.select(&CredentialFormat::JwtVcJson).is_none());
    }
}
