use std::fmt;

use serde::Deserialize;
use validator::Validate;

/// Email and password as typed into the login or registration form
#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Copy with surrounding whitespace removed from both fields
    pub fn trimmed(&self) -> Self {
        Self::new(self.email.trim(), self.password.trim())
    }

    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_and_incomplete() {
        let credentials = Credentials::new("  pat@example.com ", "   ").trimmed();
        assert_eq!(credentials.email, "pat@example.com");
        assert!(credentials.is_incomplete());
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("pat@example.com", "hunter22");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("pat@example.com"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_email_validation() {
        assert!(Credentials::new("pat@example.com", "x").validate().is_ok());
        assert!(Credentials::new("not-an-email", "x").validate().is_err());
    }
}
