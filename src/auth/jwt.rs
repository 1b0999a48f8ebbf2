use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// JWT payload: just the numeric user id. Tokens carry no expiry and there
/// is no revocation list; a token stays valid until the signing secret
/// rotates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
}

/// Single failure kind for verification. Structural, signature and claim
/// failures all collapse into this so callers cannot tell them apart.
#[derive(Debug, Error)]
#[error("Token no válido.")]
pub struct InvalidToken;

/// HS256 signing and verification keys, derived once from the process-wide
/// secret at construction time.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    pub fn sign(&self, user_id: i64) -> anyhow::Result<String> {
        let token = encode(&Header::default(), &Claims { id: user_id }, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<i64, InvalidToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims have no exp; the default validation would reject every token.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|_| InvalidToken)?;
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims.id)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}
