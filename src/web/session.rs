use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::db::DbUser;
use crate::state::SharedState;
use crate::web::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid token format")]
    Invalid,
    #[error("signature mismatch")]
    Signature,
    #[error("expired")]
    Expired,
}

/// Token layout: `base64(user_id|exp).base64(hmac_sha256(payload))`.
pub fn sign_session(user_id: Uuid, ttl: Duration, key: &[u8]) -> Result<String, SessionError> {
    let exp = Utc::now() + ttl;
    let payload = format!("{}|{}", user_id, exp.timestamp());
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(payload.as_bytes());
    let sig = mac.finalize().into_bytes();
    Ok(format!(
        "{}.{}",
        general_purpose::STANDARD.encode(payload.as_bytes()),
        general_purpose::STANDARD.encode(sig)
    ))
}

pub fn verify_session(token: &str, key: &[u8]) -> Result<SessionClaims, SessionError> {
    let (payload_b64, sig_b64) = token.split_once('.').ok_or(SessionError::Invalid)?;
    let payload_bytes = general_purpose::STANDARD
        .decode(payload_b64)
        .map_err(|_| SessionError::Invalid)?;
    let sig_bytes = general_purpose::STANDARD
        .decode(sig_b64)
        .map_err(|_| SessionError::Invalid)?;

    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(&payload_bytes);
    mac.verify_slice(&sig_bytes)
        .map_err(|_| SessionError::Signature)?;

    let payload = String::from_utf8(payload_bytes).map_err(|_| SessionError::Invalid)?;
    let (user_id, exp) = payload.split_once('|').ok_or(SessionError::Invalid)?;
    let user_id = Uuid::parse_str(user_id).map_err(|_| SessionError::Invalid)?;
    let exp: i64 = exp.parse().map_err(|_| SessionError::Invalid)?;
    if Utc::now().timestamp() > exp {
        return Err(SessionError::Expired);
    }
    Ok(SessionClaims { user_id, exp })
}

/// Bearer header first, then the session cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(bearer) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.trim().to_string());
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().strip_prefix("session="))
        .map(str::to_string)
        .next()
}

pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{secure_flag}",
        ttl.num_seconds()
    )
}

/// Authenticated account resolved from the request's session token.
pub struct UserSession(pub DbUser);

#[async_trait]
impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared_state = SharedState::from_ref(state);

        let token = extract_token(&parts.headers).ok_or(ApiError::Unauthorized("Not authenticated"))?;

        let claims = verify_session(&token, &shared_state.session_key).map_err(|e| {
            tracing::warn!("Session verification failed: {}", e);
            ApiError::Unauthorized("Invalid session")
        })?;

        let user = shared_state
            .users
            .find_user_by_id(claims.user_id)
            .await
            .map_err(|e| {
                tracing::warn!("User lookup failed for session: {}", e);
                ApiError::Unauthorized("Invalid session")
            })?
            .ok_or(ApiError::Unauthorized("Invalid session"))?;

        Ok(UserSession(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const KEY: &[u8] = b"test-session-key";

    #[test]
    fn test_sign_and_verify() {
        let user_id = Uuid::new_v4();
        let token = sign_session(user_id, Duration::minutes(60), KEY).unwrap();
        let claims = verify_session(&token, KEY).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_rejects_tampering_and_expiry() {
        let token = sign_session(Uuid::new_v4(), Duration::minutes(60), KEY).unwrap();
        assert!(matches!(
            verify_session(&token, b"other-key"),
            Err(SessionError::Signature)
        ));
        assert!(matches!(verify_session("garbage", KEY), Err(SessionError::Invalid)));

        let expired = sign_session(Uuid::new_v4(), Duration::minutes(-5), KEY).unwrap();
        assert!(matches!(verify_session(&expired, KEY), Err(SessionError::Expired)));
    }

    #[test]
    fn test_extract_token_sources() {
        let mut headers = HeaderMap::new();
        assert!(extract_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc.def"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz.123"));
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz.123"));
    }

    #[test]
    fn test_cookie_flags() {
        let cookie = session_cookie("t", Duration::minutes(60), true);
        assert_eq!(cookie, "session=t; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600; Secure");
        assert!(!session_cookie("t", Duration::minutes(1), false).contains("Secure"));
    }
}
