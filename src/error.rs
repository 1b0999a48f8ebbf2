use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// One invalid input field, as itemized to the client.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub campo: &'static str,
    pub mensaje: &'static str,
}

/// Every failure a handler can surface, tagged by kind. Handlers and the
/// auth guard return this directly; the `IntoResponse` impl owns the mapping
/// to status codes and JSON bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("errores de validación")]
    Validation(Vec<FieldError>),
    #[error("El correo ya está registrado")]
    DuplicateEmail,
    #[error("Credenciales inválidas")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // The unique index on usuarios.correo is the final authority on email
        // uniqueness; a race loser must not read as a generic 500.
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return ApiError::DuplicateEmail;
            }
        }
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials | ApiError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errores) => json!({ "errores": errores }),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                json!({ "mensaje": "Error interno del servidor" })
            }
            other => json!({ "mensaje": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_400_with_mensaje() {
        let res = ApiError::DuplicateEmail.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "El correo ya está registrado");
    }

    #[tokio::test]
    async fn invalid_credentials_maps_to_401() {
        let res = ApiError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "Credenciales inválidas");
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_itemized_errores() {
        let res = ApiError::Validation(vec![
            FieldError {
                campo: "correo",
                mensaje: "El campo correo debe ser una dirección de correo válida",
            },
            FieldError {
                campo: "contrasena",
                mensaje: "El campo contraseña debe tener al menos 6 caracteres",
            },
        ])
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        let errores = body["errores"].as_array().expect("errores array");
        assert_eq!(errores.len(), 2);
        assert_eq!(errores[0]["campo"], "correo");
    }

    #[tokio::test]
    async fn internal_hides_detail_from_client() {
        let res = ApiError::Internal(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "Error interno del servidor");
    }

    #[tokio::test]
    async fn not_found_carries_resource_message() {
        let res = ApiError::NotFound("Usuario no encontrado").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["mensaje"], "Usuario no encontrado");
    }
}
