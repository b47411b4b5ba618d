//! Admin access gate: a pluggable `Authenticator` and the shared-secret implementation.

use crate::error::AppError;
use secrecy::{ExposeSecret, SecretString};

/// Decides whether a caller-supplied credential grants admin access.
pub trait Authenticator: Send + Sync {
    /// `Ok(())` when the credential is valid; `Unauthorized` otherwise.
    fn authorize(&self, credential: Option<&str>) -> Result<(), AppError>;

    /// Exchange a password for the token admin requests must carry.
    fn login(&self, password: &str) -> Result<String, AppError>;
}

/// Single process-wide secret, used both as login password and as admin token.
pub struct SharedSecretAuthenticator {
    secret: SecretString,
}

impl SharedSecretAuthenticator {
    pub fn new(secret: SecretString) -> Self {
        SharedSecretAuthenticator { secret }
    }

    fn matches(&self, candidate: &str) -> bool {
        let expected = self.secret.expose_secret();
        !expected.is_empty() && constant_time_compare(candidate, expected)
    }
}

impl Authenticator for SharedSecretAuthenticator {
    fn authorize(&self, credential: Option<&str>) -> Result<(), AppError> {
        match credential {
            Some(token) if self.matches(token) => Ok(()),
            Some(_) => {
                tracing::warn!("admin token rejected");
                Err(AppError::Unauthorized("Unauthorized".into()))
            }
            None => {
                tracing::warn!("admin token missing");
                Err(AppError::Unauthorized("Unauthorized".into()))
            }
        }
    }

    fn login(&self, password: &str) -> Result<String, AppError> {
        if self.matches(password) {
            Ok(self.secret.expose_secret().to_string())
        } else {
            tracing::warn!("admin login failed");
            Err(AppError::Unauthorized("Invalid password".into()))
        }
    }
}

/// Compare two strings without leaking the position of the first mismatch or the length.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = a.len().max(b.len());
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);
    (lengths_equal & contents_equal).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SharedSecretAuthenticator {
        SharedSecretAuthenticator::new(SecretString::from("s3cret".to_string()))
    }

    #[test]
    fn compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("", "a"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn authorize_accepts_only_the_secret() {
        let g = gate();
        assert!(g.authorize(Some("s3cret")).is_ok());
        assert!(matches!(g.authorize(Some("nope")), Err(AppError::Unauthorized(_))));
        assert!(matches!(g.authorize(None), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn empty_secret_never_authorizes() {
        let g = SharedSecretAuthenticator::new(SecretString::from(String::new()));
        assert!(g.authorize(Some("")).is_err());
        assert!(g.login("").is_err());
    }

    #[test]
    fn login_returns_token() {
        let g = gate();
        assert_eq!(g.login("s3cret").unwrap(), "s3cret");
        match g.login("wrong") {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid password"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
