//! Pre-authorized code flow tests against a mock issuer and verifier.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{Map, Value, json};
use vci_holder::types::{
    CredentialFormat, CredentialOffer, Grants, IssuedCredential, PreAuthorizedCodeGrant,
};
use vci_holder::{Error, IssuerClient, VerifierClient, flow};

const CREDENTIAL: &str = "eyJhbGciOiJFZERTQSJ9.e30.c2ln";

// Binds an ephemeral port and serves `router` for the remainder of the test.
async fn serve(router: Router) -> String {
    let listener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("should bind listener");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server should run");
    });
    format!("http://{addr}")
}

fn subject_claims() -> Map<String, Value> {
    let Value::Object(map) = json!({"family_name": "Mustermann", "given_name": "Erika"}) else {
        unreachable!()
    };
    map
}

fn degree_offer() -> CredentialOffer {
    CredentialOffer {
        credential_issuer: "https://issuer.example.com".to_string(),
        credential_configuration_ids: vec!["university-degree-jwt".to_string()],
        grants: Some(Grants {
            authorization_code: None,
            pre_authorized_code: Some(PreAuthorizedCodeGrant {
                pre_authorized_code: "abc123".to_string(),
                user_pin_required: None,
            }),
        }),
    }
}

// ----- full flow ------------------------------------------------------------

async fn metadata() -> Json<Value> {
    Json(json!({
        "credential_issuer": "https://issuer.example.com",
        "credential_configurations_supported": {
            "university-degree-jwt": {
                "format": "jwt_vc_json",
                "types": ["VerifiableCredential", "UniversityDegree"]
            }
        }
    }))
}

async fn issue(Json(body): Json<Value>) -> Result<Json<String>, (StatusCode, String)> {
    if body["issuer_key"]["jwk"]["crv"] != "Ed25519" {
        return Err((StatusCode::BAD_REQUEST, "unexpected issuer key".to_string()));
    }
    if body["credential_data"]["family_name"] != "Mustermann" {
        return Err((StatusCode::BAD_REQUEST, "missing subject claims".to_string()));
    }
    Ok(Json(degree_offer().to_offer_uri("openid-credential-offer://")))
}

async fn token(body: String) -> Result<Json<Value>, (StatusCode, String)> {
    if !body.contains("pre-authorized_code=abc123") {
        return Err((StatusCode::BAD_REQUEST, "unexpected code".to_string()));
    }
    Ok(Json(json!({"access_token": "tok1", "c_nonce": "n1"})))
}

async fn credential(
    headers: HeaderMap, Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or_default();
    if auth != "Bearer tok1" {
        return Err((StatusCode::UNAUTHORIZED, "bad access token".to_string()));
    }

    let jwt = body["proof"]["jwt"]
        .as_str()
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "missing proof".to_string()))?;
    let payload = jwt
        .split('.')
        .nth(1)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "malformed proof".to_string()))?;
    let raw = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|_| (StatusCode::BAD_REQUEST, "malformed proof payload".to_string()))?;
    let claims: Value = serde_json::from_slice(&raw)
        .map_err(|_| (StatusCode::BAD_REQUEST, "malformed proof claims".to_string()))?;
    if claims["nonce"] != "n1" {
        return Err((StatusCode::BAD_REQUEST, "nonce mismatch".to_string()));
    }

    Ok(Json(json!({"credential": CREDENTIAL})))
}

async fn verify(Json(body): Json<Value>) -> Result<Json<String>, (StatusCode, String)> {
    if body["request_credentials"][0]["type"] != "UniversityDegree" {
        return Err((StatusCode::BAD_REQUEST, "unexpected credential type".to_string()));
    }
    Ok(Json("https://verifier.example.com/session/1".to_string()))
}

#[tokio::test]
async fn end_to_end_with_proof() {
    let issuer_base = serve(
        Router::new()
            .route("/draft13/.well-known/openid-credential-issuer", get(metadata))
            .route("/openid4vc/jwt/issue", post(issue))
            .route("/draft13/token", post(token))
            .route("/draft13/credential", post(credential)),
    )
    .await;
    let verifier_base = serve(Router::new().route("/openid4vc/verify", post(verify))).await;

    let http = reqwest::Client::new();
    let issuer = IssuerClient::new(http.clone(), issuer_base, "draft13");
    let verifier = VerifierClient::new(http, verifier_base);

    let report =
        flow::run(&issuer, &verifier, &CredentialFormat::JwtVcJson, subject_claims(), None)
            .await
            .expect("flow should complete");

    assert_eq!(
        report.credential,
        Some(IssuedCredential::Credential(CREDENTIAL.to_string()))
    );
    assert_eq!(report.credential_prefix(), Some("eyJhbG"));
}

// ----- offer indirection ----------------------------------------------------

async fn flaky_offer(State(hits): State<Arc<AtomicUsize>>) -> Result<Json<Value>, StatusCode> {
    // not readable until the third attempt
    if hits.fetch_add(1, Ordering::SeqCst) < 2 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::to_value(degree_offer()).expect("offer should serialize")))
}

#[tokio::test]
async fn offer_by_reference_retries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = serve(
        Router::new().route("/offer/{id}", get(flaky_offer)).with_state(Arc::clone(&hits)),
    )
    .await;

    let client = IssuerClient::new(reqwest::Client::new(), base.clone(), "draft13");
    let reference = format!("openid-credential-offer://?credential_offer_uri={base}/offer/1");

    let offer = client.resolve_offer(&reference).await.expect("third attempt should succeed");
    assert_eq!(offer, degree_offer());
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

async fn unavailable_offer(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::SERVICE_UNAVAILABLE
}

#[tokio::test]
async fn offer_by_reference_exhausts_retries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = serve(
        Router::new().route("/offer/{id}", get(unavailable_offer)).with_state(Arc::clone(&hits)),
    )
    .await;

    let client = IssuerClient::new(reqwest::Client::new(), base.clone(), "draft13");
    let reference = format!("openid-credential-offer://?credential_offer_uri={base}/offer/1");

    let err = client.resolve_offer(&reference).await.expect_err("should exhaust retries");
    assert!(matches!(err, Error::OfferResolution(_)));
    assert_eq!(err.status(), Some(503), "last attempt's status should be reported");
    assert_eq!(hits.load(Ordering::SeqCst), 3, "retry budget is three attempts");
}

// ----- grant validation -----------------------------------------------------

async fn counting_token(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"access_token": "tok1"}))
}

#[tokio::test]
async fn no_grant_fails_before_network() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = serve(
        Router::new().route("/draft13/token", post(counting_token)).with_state(Arc::clone(&hits)),
    )
    .await;

    let offer = CredentialOffer { grants: None, ..degree_offer() };
    let client = IssuerClient::new(reqwest::Client::new(), base, "draft13");

    let err = client.exchange_code(&offer, None).await.expect_err("should fail");
    assert!(matches!(err, Error::TokenExchange(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0, "no request should reach the token endpoint");
}

// ----- proof omission -------------------------------------------------------

async fn nonce_free_token() -> Json<Value> {
    Json(json!({"access_token": "tok2"}))
}

async fn proofless_credential(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, String)> {
    if body.get("proof").is_some() {
        return Err((StatusCode::BAD_REQUEST, "proof must be omitted".to_string()));
    }
    Ok(Json(json!({"jwt": CREDENTIAL})))
}

#[tokio::test]
async fn proof_omitted_without_nonce() {
    let base = serve(
        Router::new()
            .route("/draft13/token", post(nonce_free_token))
            .route("/draft13/credential", post(proofless_credential)),
    )
    .await;

    let client = IssuerClient::new(reqwest::Client::new(), base, "draft13");
    let token = client.exchange_code(&degree_offer(), None).await.expect("should exchange");
    assert_eq!(token.c_nonce, None);

    let holder_key = vci_holder::SigningKey::generate();
    let response = client
        .fetch_credential(&token, "university-degree-jwt", CredentialFormat::JwtVcJson, &holder_key)
        .await
        .expect("should fetch without proof");
    assert_eq!(
        response.issued().expect("should extract"),
        IssuedCredential::Jwt(CREDENTIAL.to_string())
    );
}
