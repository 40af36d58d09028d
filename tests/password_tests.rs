//! 密码哈希功能单元测试
//!
//! 测试 Argon2id 密码哈希和验证功能

use taskgate::auth::PasswordHasher;

#[test]
fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new();
    let password = "password123";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 哈希值应该包含 argon2 标识
    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.verify(password, &hash));
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = PasswordHasher::new();
    let hash = hasher.hash("password123").expect("Hashing should succeed");

    for wrong in ["password124", "Password123", "password123 ", ""] {
        assert!(!hasher.verify(wrong, &hash), "{:?} should not verify", wrong);
    }
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = PasswordHasher::new();
    let password = "password123";

    let hash1 = hasher.hash(password).expect("First hash should succeed");
    let hash2 = hasher.hash(password).expect("Second hash should succeed");

    // 由于随机盐，每次生成的哈希应该不同
    assert_ne!(hash1, hash2, "Hashes should be different due to salt");

    assert!(hasher.verify(password, &hash1));
    assert!(hasher.verify(password, &hash2));
}

#[test]
fn test_verify_malformed_hash_returns_false() {
    let hasher = PasswordHasher::new();

    assert!(!hasher.verify("password123", "plaintext-password123"));
    assert!(!hasher.verify("password123", "$argon2id$v=19$broken"));
    // bcrypt 格式的哈希不属于本服务，按不匹配处理
    assert!(!hasher.verify(
        "secret",
        "$2b$12$K5x.QqXEuudV/tkvi9I3geX0sO./OPP3QapL.CvqKmPt2iHRxB4Ye"
    ));
}

#[test]
fn test_unicode_password() {
    let hasher = PasswordHasher::new();
    let password = "密码-пароль-🔐";

    let hash = hasher.hash(password).unwrap();
    assert!(hasher.verify(password, &hash));
    assert!(!hasher.verify("密码-пароль", &hash));
}
