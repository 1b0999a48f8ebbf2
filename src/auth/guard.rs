use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{auth::jwt::JwtKeys, error::ApiError};

pub const AUTH_HEADER: &str = "x-auth-token";

/// Gate for protected routes: extracts the raw token from `x-auth-token`
/// (no `Bearer` prefix), verifies it and yields the user id. Rejection
/// short-circuits the request before any handler runs; the guard never
/// touches the database.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated(
                "Acceso denegado. Token no proporcionado.",
            ))?;

        let keys = JwtKeys::from_ref(state);
        match keys.verify(token) {
            Ok(id) => Ok(AuthUser(id)),
            Err(_) => {
                warn!("request with invalid token");
                Err(ApiError::Unauthenticated("Token no válido."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Json, Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::state::AppState;

    /// Protected router over a fake state; `hit` records whether the
    /// downstream handler actually ran.
    fn protected_app(state: AppState, hit: Arc<AtomicBool>) -> Router {
        Router::new()
            .route(
                "/protegido",
                get(move |AuthUser(id): AuthUser| {
                    let hit = hit.clone();
                    async move {
                        hit.store(true, Ordering::SeqCst);
                        Json(serde_json::json!({ "id": id }))
                    }
                }),
            )
            .with_state(state)
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn missing_header_is_401_and_handler_never_runs() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = protected_app(AppState::fake(), hit.clone());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/protegido")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "Acceso denegado. Token no proporcionado.");
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn malformed_token_is_401_with_same_shape() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = protected_app(AppState::fake(), hit.clone());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/protegido")
                    .header(AUTH_HEADER, "no-es-un-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "Token no válido.");
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_401() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = protected_app(AppState::fake(), hit.clone());

        let other = JwtKeys::new(&crate::config::JwtConfig {
            secret: "otro-secreto".into(),
        });
        let token = other.sign(1).expect("sign");

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/protegido")
                    .header(AUTH_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn valid_token_admits_and_injects_identity() {
        let hit = Arc::new(AtomicBool::new(false));
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(42).expect("sign");
        let app = protected_app(state, hit.clone());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/protegido")
                    .header(AUTH_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["id"], 42);
        assert!(hit.load(Ordering::SeqCst));
    }
}
