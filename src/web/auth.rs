use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use uuid::Uuid;

use crate::db::NewUser;
use crate::state::SharedState;
use crate::web::error::ApiError;
use crate::web::session::{self, UserSession};

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(state)
}

async fn guard_rate(state: &SharedState, addr: SocketAddr) -> Result<(), ApiError> {
    let ip = addr.ip().to_string();
    if !state.auth_limiter.check(&ip).await {
        tracing::warn!("Auth rate limit exceeded for IP: {}", ip);
        return Err(ApiError::RateLimited);
    }
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn signup(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<SharedState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    guard_rate(&state, addr).await?;

    let username = payload.username.trim();
    let email = normalize_email(&payload.email);
    if username.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("All fields are required!"));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::Internal("Signup failed")
        })?
        .to_string();

    let user = state
        .users
        .create_user(NewUser {
            username: username.to_string(),
            email,
            hash,
        })
        .await?;
    tracing::info!("User {} registered", user.id);

    Ok(Json(MessageResponse {
        message: "User registered successfully!",
    }))
}

async fn login(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    guard_rate(&state, addr).await?;

    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required!"));
    }

    let invalid = ApiError::Unauthorized("Invalid credentials");
    let Some(user) = state.users.find_user_by_email(&email).await? else {
        return Err(invalid);
    };

    let parsed_hash = PasswordHash::new(&user.hash).map_err(|_| ApiError::Unauthorized("Invalid credentials"))?;
    if Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid);
    }

    let token = session::sign_session(user.id, state.session_ttl, &state.session_key).map_err(|e| {
        tracing::error!("Session signing failed: {}", e);
        ApiError::Internal("Server error")
    })?;

    let cookie = session::session_cookie(&token, state.session_ttl, state.secure_cookies);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|_| ApiError::Internal("Server error"))?,
    );
    tracing::info!("User {} logged in", user.id);

    Ok((
        headers,
        Json(LoginResponse {
            message: "Login successful",
            token,
        }),
    ))
}

async fn me(UserSession(user): UserSession) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    })
}
