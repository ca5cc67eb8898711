// Firebase signing-key cache against a mocked Google JWKS endpoint.

use campus_eats::auth::jwks::{JwksCache, JwksError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Public RSA modulus accepted by `DecodingKey::from_rsa_components`.
const RSA_N: &str = "pjdss8ZaDfEH6K6U7GeW2nxDqR4IP049fk1fK0lndimbMMVBdPv_hSpm8T8EtBDxrUdi1OHZfMhUixGyw-J5Pu3M0uNPPgBodGFrqM_0_TwkFuNNdYbSiGRuALLmWHLovzV5STG3GFjBGQDHPsJMqOoTzRDnkjZQ7dqMmSGjBQZWm0_Y5rmLEr5TBBh1PEOhM4H-o7RsBg0OcCh0ILsM3KWVDdnnS34yROFhZt0NqFkBP_x5HNu5TqC2v94JUC5r0KvPvtdpR66qSPGWqcqDWFLSPAI0RkAJhAFdQlpqrOBqMg5-lBqe3e_UElBQiQPiHarLpjkFyInkGug4Dw";

fn key_set(kids: &[&str]) -> String {
    let keys: Vec<_> = kids
        .iter()
        .map(|kid| json!({ "kty": "RSA", "alg": "RS256", "kid": kid, "n": RSA_N, "e": "AQAB" }))
        .collect();
    json!({ "keys": keys }).to_string()
}

fn google_keys(kids: &[&str], max_age: u64) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("cache-control", format!("public, max-age={max_age}, must-revalidate").as_str())
        .set_body_string(key_set(kids))
}

fn cache_for(server: &MockServer) -> JwksCache {
    JwksCache::new(format!("{}/robot/v1/metadata/jwk", server.uri()), 3600)
}

#[actix_rt::test]
async fn keys_are_served_from_cache_within_max_age() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robot/v1/metadata/jwk"))
        .respond_with(google_keys(&["firebase-1"], 300))
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("firebase-1").await.expect("first lookup fetches");
    cache.get_key("firebase-1").await.expect("second lookup is cached");
}

#[actix_rt::test]
async fn zero_max_age_refetches_on_every_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robot/v1/metadata/jwk"))
        .respond_with(google_keys(&["firebase-1"], 0))
        .expect(2)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("firebase-1").await.expect("first lookup");
    cache.get_key("firebase-1").await.expect("expired set is fetched again");
}

#[actix_rt::test]
async fn unknown_kid_refreshes_before_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robot/v1/metadata/jwk"))
        .respond_with(google_keys(&["old-key"], 3600))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/robot/v1/metadata/jwk"))
        .respond_with(google_keys(&["old-key", "rotated-key"], 3600))
        .expect(2)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("old-key").await.expect("initial set");
    cache
        .get_key("rotated-key")
        .await
        .expect("rotation picked up without waiting for max-age");

    let err = cache
        .get_key("never-issued")
        .await
        .err()
        .expect("kid absent after refresh");
    assert!(matches!(err, JwksError::NotFound(ref kid) if kid == "never-issued"));
}

#[actix_rt::test]
async fn non_rsa_keys_are_skipped() {
    let server = MockServer::start().await;
    let body = json!({
        "keys": [
            { "kty": "EC", "kid": "ec-key", "crv": "P-256", "x": "abc", "y": "def" },
            { "kty": "RSA", "kid": "rsa-key", "n": RSA_N, "e": "AQAB" }
        ]
    })
    .to_string();
    Mock::given(method("GET"))
        .and(path("/robot/v1/metadata/jwk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("rsa-key").await.expect("RSA key loads");
    let err = cache
        .get_key("ec-key")
        .await
        .err()
        .expect("EC key is not usable for RS256");
    assert!(matches!(err, JwksError::NotFound(_)));
}
