//! Administrator credential gate.
//!
//! This is a fixed username/password comparison, nothing more: no hashing, no sessions,
//! no lockout. It only decides whether the triage operations are offered.

/// Username/password pair accepted by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Expected username.
    pub username: String,
    /// Expected password.
    pub password: String,
}

impl AdminCredentials {
    /// Credentials other than the built-in defaults.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether both fields match exactly. Input is not trimmed.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_is_accepted() {
        assert!(AdminCredentials::default().verify("admin", "admin123"));
    }

    #[test]
    fn mismatches_are_rejected() {
        let creds = AdminCredentials::default();
        assert!(!creds.verify("admin", "admin"));
        assert!(!creds.verify("Admin", "admin123"));
        assert!(!creds.verify(" admin", "admin123"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn custom_pair_replaces_default() {
        let creds = AdminCredentials::new("warden", "s3cret");
        assert!(creds.verify("warden", "s3cret"));
        assert!(!creds.verify("admin", "admin123"));
    }
}
