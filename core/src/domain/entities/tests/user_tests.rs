//! Unit tests for the user entity

use crate::domain::entities::user::User;
use crate::domain::value_objects::{SigningKey, MIN_SIGNING_KEY_BYTES};

#[test]
fn test_new_user_is_enabled() {
    let mut user = User::new("Ana", "ana@uni.edu", "$2b$hash", "STUDENT");
    assert!(user.enabled);

    user.disable();
    assert!(!user.enabled);
}

#[test]
fn test_profile_omits_password_hash() {
    let user = User::new("Ana", "ana@uni.edu", "$2b$hash", "STUDENT");
    let profile = user.profile();

    assert_eq!(profile.id, user.id);
    assert_eq!(profile.email, "ana@uni.edu");
    assert_eq!(profile.role, "STUDENT");

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

#[test]
fn test_signing_key_length_and_redaction() {
    assert!(SigningKey::new(vec![7u8; MIN_SIGNING_KEY_BYTES - 1]).is_err());

    let key = SigningKey::from_secret("0123456789abcdef0123456789abcdef").unwrap();
    assert_eq!(key.as_bytes().len(), 32);

    let debug = format!("{:?}", key);
    assert!(!debug.contains("0123456789abcdef"));
    assert!(debug.contains("redacted"));
}
