use campus_eats::auth::admin_jwt::{issue_admin_jwt, verify_admin_jwt};
use campus_eats::auth::AdminJwtConfig;
use campus_eats::test_utils::init_test_env;
use jsonwebtoken::{Algorithm, EncodingKey, Header};

fn test_jwt_config() -> AdminJwtConfig {
    init_test_env();
    AdminJwtConfig::from_env()
}

fn encode_claims(cfg: &AdminJwtConfig, claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .expect("encode")
}

#[test]
fn admin_jwt_issue_and_verify_round_trip() {
    let cfg = test_jwt_config();

    let token = issue_admin_jwt("cafe-admin", &cfg).expect("issue jwt");
    let got_id = verify_admin_jwt(&token, &cfg).expect("verify jwt");
    assert_eq!(got_id, "cafe-admin");
}

#[test]
fn admin_jwt_wrong_secret_fails() {
    let cfg = test_jwt_config();
    let token = issue_admin_jwt("cafe-admin", &cfg).expect("issue jwt");

    let bad_cfg = AdminJwtConfig {
        secret: "wrong-secret".to_string(),
        ..cfg.clone()
    };
    assert!(verify_admin_jwt(&token, &bad_cfg).is_err());
}

#[test]
fn admin_jwt_expired_token_fails() {
    let cfg = test_jwt_config();
    let token = encode_claims(
        &cfg,
        serde_json::json!({
            "iss": cfg.issuer,
            "aud": cfg.audience,
            "sub": "cafe-admin",
            "iat": 1u64,
            "exp": 1u64,
        }),
    );
    assert!(verify_admin_jwt(&token, &cfg).is_err());
}

#[test]
fn admin_jwt_wrong_issuer_fails() {
    let cfg = test_jwt_config();
    let token = issue_admin_jwt("cafe-admin", &cfg).expect("issue jwt");

    let bad_cfg = AdminJwtConfig {
        issuer: "wrong-issuer".to_string(),
        ..cfg.clone()
    };
    assert!(verify_admin_jwt(&token, &bad_cfg).is_err());
}

#[test]
fn admin_jwt_empty_subject_fails() {
    let cfg = test_jwt_config();
    let far_future = chrono::Utc::now().timestamp() as u64 + 3600;
    let token = encode_claims(
        &cfg,
        serde_json::json!({
            "iss": cfg.issuer,
            "aud": cfg.audience,
            "sub": "",
            "iat": 1u64,
            "exp": far_future,
        }),
    );
    assert!(verify_admin_jwt(&token, &cfg).is_err());
}
