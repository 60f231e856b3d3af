//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and injects the request context.
//!
//! Tokens are minted by the identity provider in front of PetroDesk; this
//! extractor only checks the signature, expiry, and (when configured) the
//! issuer, and pulls the caller id out of the claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use petrodesk_core::error::AppError;
use petrodesk_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims PetroDesk understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's user id.
    pub sub: String,
    /// Display name, when the issuer includes one.
    pub name: Option<String>,
    /// Expiration (unix seconds).
    pub exp: i64,
    /// Issuer.
    pub iss: Option<String>,
}

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        if !state.config.auth.issuer.is_empty() {
            validation.set_issuer(&[&state.config.auth.issuer]);
        }

        let key = DecodingKey::from_secret(state.config.auth.jwt_secret.as_bytes());
        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {e}")))?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::unauthorized("Token subject is not a valid user id"))?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(AuthUser(RequestContext::new(
            user_id,
            data.claims.name,
            ip_address,
            user_agent,
        )))
    }
}
