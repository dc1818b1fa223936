use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secure memory container for sensitive data that automatically zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Get a reference to the inner string
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(<redacted>)")
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_basic_operations() {
        let secret = SecureString::new("ghp_example".to_string());
        assert_eq!(secret.as_str(), "ghp_example");
        assert_eq!(secret.len(), 11);
        assert!(!secret.is_empty());
        assert!(SecureString::from("").is_empty());
    }

    #[test]
    fn test_secure_string_debug_is_redacted() {
        let secret = SecureString::from("ghp_do_not_print");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("ghp_do_not_print"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_secure_string_zeroize() {
        let mut secret = SecureString::from("ghp_to_be_cleared".to_string());
        secret.zeroize();
        assert!(secret.is_empty());
    }
}
