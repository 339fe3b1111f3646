//! Bearer-token authentication.
//!
//! Identities are issued by an external provider as HS256-signed JWTs. The
//! `sub` claim is the user id and the optional `email` claim is checked
//! against the profile email on sign-up.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::domain::user::Identity;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "Token expired",
                ErrorKind::InvalidAudience => "Invalid audience",
                _ => "Could not validate credentials",
            };
            log::warn!("rejected bearer token: {e}");
            AppError::Unauthenticated(reason.to_string())
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::Unauthenticated(
                "Could not validate credentials".to_string(),
            ));
        }
        Ok(Identity {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

/// The caller's verified identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    /// Only the owner of `user_id` may act on it.
    pub fn ensure_is(&self, user_id: &str) -> Result<(), AppError> {
        if self.0.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| AppError::Internal("token verifier is not registered".to_string()))?;

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing bearer token".to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Invalid token format".to_string()))?;

    verifier.verify(token).map(AuthenticatedUser)
}
