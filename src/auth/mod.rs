pub mod password;
pub mod session;
pub mod token;

use lazy_static::lazy_static;
use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use password::{hash_password, verify_password};
pub use session::{clear_session_cookie, session_cookie, Identity, SESSION_COOKIE};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// The login form payload.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// The registration form payload.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Unique across all accounts.
    #[validate(email)]
    pub email: String,
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            email: "test@example.com".to_string(),
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            email: "test@example.com".to_string(),
            username: "test user!".to_string(), // Contains space and exclamation
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            email: "test@example.com".to_string(),
            username: "tu".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());
    }
}
