//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// The shared admin credential, stored only as a bcrypt hash.
///
/// The plaintext from the config file is hashed once at startup and then
/// dropped.
#[derive(Clone)]
pub struct AdminCredentials {
    password_hash: String,
}

impl AdminCredentials {
    /// Hash the configured admin password
    pub fn from_plain(password: &str) -> Result<Self, bcrypt::BcryptError> {
        Ok(Self {
            password_hash: hash_password(password)?,
        })
    }

    /// Check a login attempt against the stored hash
    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_admin_credentials() {
        let creds = AdminCredentials::from_plain("hunter2-but-longer").unwrap();
        assert!(creds.verify("hunter2-but-longer"));
        assert!(!creds.verify("hunter2"));
        assert!(!creds.verify(""));
    }
}
