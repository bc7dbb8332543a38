//! The session cookie and the per-request identity it resolves to.
//!
//! Identity is request-scoped state: every handler that cares receives an
//! [`Identity`] through the extractor below. Anonymity is a legitimate state
//! (the task list renders for anyone), so extraction never fails — a
//! missing, malformed, or expired session cookie resolves to
//! [`Identity::Anonymous`].

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::verify_token;

pub const SESSION_COOKIE: &str = "session";

/// The caller's resolved identity: a registered user or the anonymous
/// placeholder, which carries no privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    User(i64),
    Anonymous,
}

impl Identity {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Identity::User(id) => Some(*id),
            Identity::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| verify_token(cookie.value()).ok())
            .map(|claims| Identity::User(claims.sub))
            .unwrap_or(Identity::Anonymous);
        ready(Ok(identity))
    }
}

/// Builds the session cookie a successful login sets.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Builds the removal cookie logout sets.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
