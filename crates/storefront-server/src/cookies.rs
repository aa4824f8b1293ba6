//! Session cookie helpers.
//!
//! Both tokens travel as cookies that page scripts cannot read (`HttpOnly`),
//! are never attached to cross-site requests (`SameSite=Strict`), and are
//! marked `Secure` outside development.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use storefront_auth::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL, TokenPair};

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

fn session_cookie(name: &'static str, value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(max_age);
    cookie
}

fn access_max_age() -> time::Duration {
    time::Duration::seconds(ACCESS_TOKEN_TTL.as_secs() as i64)
}

fn refresh_max_age() -> time::Duration {
    time::Duration::seconds(REFRESH_TOKEN_TTL.as_secs() as i64)
}

/// Set both session cookies from a freshly issued pair.
pub fn set_session(jar: CookieJar, pair: &TokenPair, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, pair.access.clone(), access_max_age(), secure))
        .add(session_cookie(REFRESH_COOKIE, pair.refresh.clone(), refresh_max_age(), secure))
}

/// Replace the access cookie only. Used by the refresh endpoint, which leaves
/// the refresh cookie untouched.
pub fn set_access(jar: CookieJar, access_token: String, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, access_token, access_max_age(), secure))
}

/// Expire both session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let expire = |name: &'static str| {
        let mut cookie = Cookie::new(name, "");
        cookie.set_path("/");
        cookie.set_max_age(time::Duration::ZERO);
        cookie
    };
    jar.add(expire(ACCESS_COOKIE)).add(expire(REFRESH_COOKIE))
}
