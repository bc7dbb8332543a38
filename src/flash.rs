//! One-shot advisory messages, carried as a typed code in a short-lived
//! cookie and consumed by the next page render.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

pub const FLASH_COOKIE: &str = "flash";

/// The advisories the service can leave for the next render. The cookie
/// stores the stable code; the render payload carries the full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SignInRequired,
    EmailTaken,
    WrongPassword,
    UnknownEmail,
}

impl Flash {
    pub fn code(&self) -> &'static str {
        match self {
            Flash::SignInRequired => "sign_in_required",
            Flash::EmailTaken => "email_taken",
            Flash::WrongPassword => "wrong_password",
            Flash::UnknownEmail => "unknown_email",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::SignInRequired => "Please sign up or log in first.",
            Flash::EmailTaken => "The email is already used. Please try again.",
            Flash::WrongPassword => "Password incorrect. Please try again.",
            Flash::UnknownEmail => "The email does not exist. Please try again.",
        }
    }

    pub fn from_code(code: &str) -> Option<Flash> {
        match code {
            "sign_in_required" => Some(Flash::SignInRequired),
            "email_taken" => Some(Flash::EmailTaken),
            "wrong_password" => Some(Flash::WrongPassword),
            "unknown_email" => Some(Flash::UnknownEmail),
            _ => None,
        }
    }
}

/// A cookie carrying the advisory to the next render.
pub fn set(flash: Flash) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, flash.code())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// A removal cookie; attached by renders that consumed a pending advisory.
pub fn clear() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

/// Reads the pending advisory from the request, if any. Unknown codes are
/// ignored.
pub fn take(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_code_round_trip() {
        for flash in [
            Flash::SignInRequired,
            Flash::EmailTaken,
            Flash::WrongPassword,
            Flash::UnknownEmail,
        ] {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("nonsense"), None);
    }

    #[test]
    fn test_set_builds_scoped_http_only_cookie() {
        let cookie = set(Flash::EmailTaken);
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "email_taken");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_take_reads_pending_advisory() {
        let req = TestRequest::default()
            .cookie(set(Flash::WrongPassword))
            .to_http_request();
        assert_eq!(take(&req), Some(Flash::WrongPassword));
    }

    #[test]
    fn test_take_ignores_missing_or_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(take(&req), None);

        let req = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, "not-a-code"))
            .to_http_request();
        assert_eq!(take(&req), None);
    }
}
