use coachdesk::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_bcrypt_hash() {
    let hash = hash_password("secret123").unwrap();
    assert_ne!(hash, "secret123");
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_accepts_correct_password() {
    let hash = hash_password("secret123").unwrap();
    assert!(verify_password("secret123", &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_wrong_password() {
    let hash = hash_password("secret123").unwrap();
    assert!(!verify_password("not-the-password", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    let first = hash_password("secret123").unwrap();
    let second = hash_password("secret123").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_verify_password_malformed_hash_errors() {
    assert!(verify_password("secret123", "not-a-bcrypt-hash").is_err());
}
