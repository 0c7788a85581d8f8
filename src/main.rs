//! Passport-to-mobile-document demo: walks the pre-authorized issuance flow
//! against an issuer deployment, then opens a verification session.
//!
//! Configuration is taken from the environment:
//!
//! * `ISSUER_URL`: issuer base URL (default `http://localhost:7002`)
//! * `ISSUER_API_VERSION`: API version path segment (default `draft13`)
//! * `VERIFIER_URL`: verifier base URL (default `http://localhost:7003`)
//! * `CREDENTIAL_FORMAT`: requested format (default `jwt_vc_json`)
//!
//! Exits 0 on reaching `DONE`, 1 on any step failure, printing the failing
//! step's HTTP status and body when available.

use std::env;
use std::process::ExitCode;

use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;
use vci_holder::types::{CredentialFormat, VerifySession};
use vci_holder::{IssuerClient, VerifierClient, flow};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let issuer_url = env_or("ISSUER_URL", "http://localhost:7002");
    let version = env_or("ISSUER_API_VERSION", "draft13");
    let verifier_url = env_or("VERIFIER_URL", "http://localhost:7003");
    let format = match env_or("CREDENTIAL_FORMAT", "jwt_vc_json").parse::<CredentialFormat>() {
        Ok(format) => format,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let http = reqwest::Client::new();
    let issuer = IssuerClient::new(http.clone(), issuer_url, version);
    let verifier = VerifierClient::new(http, verifier_url);

    match flow::run(&issuer, &verifier, &format, passport_claims(), None).await {
        Ok(report) => {
            match report.credential_prefix() {
                Some(prefix) => tracing::info!("credential issued, prefix: {prefix}"),
                None => tracing::warn!("flow completed but no credential could be extracted"),
            }
            match &report.verification {
                VerifySession::Url(url) => tracing::info!("verification session: {url}"),
                VerifySession::Object(obj) => tracing::info!("verification session: {obj}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// Mock passport data standing in for an NFC chip read.
fn passport_claims() -> Map<String, Value> {
    let claims = json!({
        "family_name": "Mustermann",
        "given_name": "Erika",
        "birth_date": "1986-03-12",
        "document_number": "C01X00T47",
        "issuing_country": "DE",
        "expiry_date": "2031-08-01"
    });
    match claims {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
