use coachdesk::config::jwt::JwtConfig;
use coachdesk::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = create_access_token(
        Uuid::new_v4(),
        "Test Admin",
        "test@example.com",
        vec!["students:read".to_string()],
        &jwt_config,
    );

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_roundtrips_claims() {
    let jwt_config = get_test_jwt_config();
    let admin_id = Uuid::new_v4();
    let permissions = vec!["students:read".to_string(), "admins:write".to_string()];

    let token = create_access_token(
        admin_id,
        "Test Admin",
        "test@example.com",
        permissions.clone(),
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, admin_id.to_string());
    assert_eq!(claims.name, "Test Admin");
    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.permissions, permissions);
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "Test Admin",
        "test@example.com",
        vec![],
        &jwt_config,
    )
    .unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    assert!(verify_token(&token, &wrong_jwt_config).is_err());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
    ];

    for token in malformed_tokens {
        assert!(verify_token(token, &jwt_config).is_err());
    }
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "Test Admin",
        "test@example.com",
        vec![],
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}
