//! Explicit per-request context: request ID plus the authenticated user.
//!
//! The context is built once per request by an extractor and passed to
//! handlers as an argument -- identity never travels through ambient
//! request extensions. Credentials come from the `Authorization: Basic`
//! header and are resolved against the credential table on every request;
//! resolved users are not cached between requests.
//!
//! Absent credentials produce an anonymous context (reads are public).
//! Present-but-invalid credentials fail closed at extraction.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use jitney_core::auth::{AuthError, User};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request-scoped values carried explicitly through the call chain.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Fresh random ID identifying this request in logs.
    pub request_id: Uuid,
    /// The authenticated user, if credentials were supplied.
    pub user: Option<User>,
}

impl RequestContext {
    /// The authenticated user, or [`AuthError::Unauthenticated`].
    pub fn authenticated(&self) -> Result<&User, ApiError> {
        self.user
            .as_ref()
            .ok_or(ApiError::Auth(AuthError::Unauthenticated))
    }
}

impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let request_id = Uuid::new_v4();

        let user = match parts.headers.get(AUTHORIZATION) {
            None => None,
            Some(header) => {
                let (login, password) = decode_basic(header.as_bytes())?;
                let user = state
                    .credentials
                    .login(&login, &password)
                    .map_err(|err| {
                        tracing::warn!(request_id = %request_id, login = %login, "Bad login");
                        ApiError::Auth(err)
                    })?;
                tracing::debug!(request_id = %request_id, login = %user.login, "Logged in");
                Some(user)
            }
        };

        Ok(Self { request_id, user })
    }
}

/// Decode an `Authorization: Basic base64(login:password)` header.
///
/// Any malformed header fails closed as [`AuthError::BadLogin`].
fn decode_basic(header: &[u8]) -> Result<(String, String), AuthError> {
    let encoded = header
        .strip_prefix(b"Basic ")
        .ok_or(AuthError::BadLogin)?;
    let decoded = BASE64.decode(encoded).map_err(|_| AuthError::BadLogin)?;
    let text = String::from_utf8(decoded).map_err(|_| AuthError::BadLogin)?;
    let (login, password) = text.split_once(':').ok_or(AuthError::BadLogin)?;
    Ok((login.to_owned(), password.to_owned()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn decodes_well_formed_basic_header() {
        let header = format!("Basic {}", BASE64.encode("otto:axle-7"));
        let (login, password) = decode_basic(header.as_bytes()).unwrap();
        assert_eq!(login, "otto");
        assert_eq!(password, "axle-7");
    }

    #[test]
    fn malformed_headers_fail_closed() {
        for header in [
            &b"Bearer abc"[..],
            b"Basic not-base64!",
            b"Basic ",
            // Valid base64, no colon separator.
            b"Basic b3R0bw==",
        ] {
            assert_eq!(decode_basic(header), Err(AuthError::BadLogin));
        }
    }

    #[test]
    fn password_may_contain_colons() {
        let header = format!("Basic {}", BASE64.encode("otto:a:b:c"));
        let (_, password) = decode_basic(header.as_bytes()).unwrap();
        assert_eq!(password, "a:b:c");
    }
}
