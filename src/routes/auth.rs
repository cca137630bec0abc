// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

use super::OkResponse;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_TTL_SECS, TOKEN_COOKIE};
use crate::models::Role;
use crate::services::github::upsert_github_user;
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// How long a signed OAuth state stays valid.
const STATE_TTL_MS: u128 = 10 * 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/github", get(auth_start))
        .route("/api/auth/github/callback", get(auth_callback))
        .route("/api/logout", post(logout))
}

/// Query parameters for starting OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Role picked on the login page, applied if the user has none yet.
    #[serde(default)]
    role: Option<String>,
    /// Frontend URL to return to. Must be the configured frontend or an
    /// allowed CORS origin.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Decoded contents of a verified OAuth state.
#[derive(Debug, PartialEq)]
struct OAuthState {
    frontend_url: String,
    role: Option<Role>,
    issued_at_ms: u128,
}

fn now_millis() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

/// Callback URL on this server, derived from the request's Host header.
fn callback_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:5001");

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}/api/auth/github/callback", scheme, host)
}

/// Start OAuth flow - redirect to GitHub authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
    headers: HeaderMap,
) -> Result<Redirect> {
    let frontend_url = match params.redirect_uri {
        Some(uri) if is_allowed_frontend(&state, &uri) => uri.trim_end_matches('/').to_string(),
        Some(uri) => {
            tracing::warn!(redirect_uri = %uri, "Ignoring redirect_uri outside the allow-list");
            state.config.frontend_url.clone()
        }
        None => state.config.frontend_url.clone(),
    };

    let role = match params.role.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            Role::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", raw)))?,
        ),
    };

    let oauth_state = sign_state(&frontend_url, role, now_millis()?, &state.config.oauth_state_key)?;
    let auth_url = state
        .github
        .authorize_url(&callback_url(&headers), &oauth_state);

    tracing::info!(
        frontend_url = %frontend_url,
        role = role.map(|r| r.as_str()).unwrap_or("none"),
        "Starting OAuth flow, redirecting to GitHub"
    );

    Ok(Redirect::temporary(&auth_url))
}

fn is_allowed_frontend(state: &AppState, uri: &str) -> bool {
    let uri = uri.trim_end_matches('/');
    uri == state.config.frontend_url.trim_end_matches('/')
        || state.config.cors_allowed_origins.iter().any(|o| o == uri)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, upsert user, set session cookie.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    let default_login = format!("{}/login", state.config.frontend_url);

    let Some(oauth_state) = params.state.as_deref().and_then(|s| {
        verify_state(s, &state.config.oauth_state_key, now_millis().ok()?)
    }) else {
        tracing::warn!("Invalid, expired or tampered OAuth state parameter");
        return Ok((
            jar,
            Redirect::temporary(&format!("{}?error=invalid_state", default_login)),
        ));
    };
    tracing::debug!(issued_at_ms = %oauth_state.issued_at_ms, "OAuth state verified");
    let login_url = format!("{}/login", oauth_state.frontend_url);

    // Check for OAuth errors
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from GitHub");
        let redirect = format!("{}?error={}", login_url, urlencoding::encode(&error));
        return Ok((jar, Redirect::temporary(&redirect)));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for access token");
    let access_token = state
        .github
        .exchange_code(&code, &callback_url(&headers))
        .await?;
    let github_user = state.github.get_user(&access_token).await?;

    let user = upsert_github_user(&state.db, &github_user, oauth_state.role)?;
    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = user.role.map(|r| r.as_str()).unwrap_or("none"),
        "OAuth successful, user stored"
    );

    let jwt = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(jwt, state.config.secure_cookies())),
        Redirect::temporary(&login_url),
    ))
}

fn session_cookie(jwt: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, jwt))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build()
}

/// Logout - clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        OkResponse::ok(),
    )
}

// ─── OAuth State ─────────────────────────────────────────────

fn state_mac(payload: &str, secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Sign `frontend_url|role|timestamp_hex` and base64url-encode it with its
/// hex signature appended.
fn sign_state(
    frontend_url: &str,
    role: Option<Role>,
    issued_at_ms: u128,
    secret: &[u8],
) -> Result<String> {
    let payload = format!(
        "{}|{}|{:x}",
        frontend_url,
        role.map(|r| r.as_str()).unwrap_or(""),
        issued_at_ms
    );
    let signature = state_mac(&payload, secret)?;
    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify the HMAC signature and age of an OAuth state and decode it.
fn verify_state(state: &str, secret: &[u8], now_ms: u128) -> Option<OAuthState> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Split from the right so the URL may contain '|'.
    let mut parts = state_str.rsplitn(4, '|');
    let signature_hex = parts.next()?;
    let timestamp_hex = parts.next()?;
    let role = parts.next()?;
    let frontend_url = parts.next()?;

    let payload = format!("{}|{}|{}", frontend_url, role, timestamp_hex);
    let expected = state_mac(&payload, secret).ok()?;
    let provided = hex::decode(signature_hex).ok()?;

    if !bool::from(provided.ct_eq(&expected)) {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    let issued_at_ms = u128::from_str_radix(timestamp_hex, 16).ok()?;
    if now_ms.saturating_sub(issued_at_ms) > STATE_TTL_MS {
        tracing::warn!("OAuth state expired");
        return None;
    }

    let role = if role.is_empty() {
        None
    } else {
        Some(Role::parse(role)?)
    };

    Some(OAuthState {
        frontend_url: frontend_url.to_string(),
        role,
        issued_at_ms,
    })
}
