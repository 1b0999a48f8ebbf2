use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        guard::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    state::AppState,
};

use super::dto::{ActualizarUsuarioRequest, LoginRequest, RegistroRequest, TokenResponse};
use super::repo::Usuario;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registro", post(registrar))
        .route("/login", post(login))
        .route("/", get(listar))
        .route("/:id", get(obtener).put(actualizar).delete(borrar))
}

#[instrument(skip(state, payload))]
pub async fn registrar(
    State(state): State<AppState>,
    Json(payload): Json<RegistroRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    // Friendly pre-check; the unique index on correo remains the final
    // authority if a concurrent registro wins the race.
    if Usuario::find_by_correo(&state.db, &payload.correo)
        .await?
        .is_some()
    {
        warn!(correo = %payload.correo, "registro with already used correo");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.contrasena)?;
    let usuario = Usuario::create(&state.db, &payload.nombre, &payload.correo, &hash).await?;

    let token = JwtKeys::from_ref(&state).sign(usuario.id)?;

    info!(usuario_id = usuario.id, "usuario registered");
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    // Unknown correo and wrong contrasena answer identically.
    let usuario = Usuario::find_by_correo(&state.db, &payload.correo)
        .await?
        .ok_or_else(|| {
            warn!("login with unknown correo");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.contrasena, &usuario.contrasena)? {
        warn!(usuario_id = usuario.id, "login with wrong contrasena");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(usuario.id)?;

    info!(usuario_id = usuario.id, "usuario logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn listar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = Usuario::list(&state.db).await?;
    Ok(Json(usuarios))
}

#[instrument(skip(state))]
pub async fn obtener(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Usuario>, ApiError> {
    let usuario = Usuario::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Usuario no encontrado"))?;
    Ok(Json(usuario))
}

#[instrument(skip(state, payload))]
pub async fn actualizar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarUsuarioRequest>,
) -> Result<Json<Usuario>, ApiError> {
    // Rehash only when a new, non-empty contrasena is supplied.
    let nueva_contrasena = match payload.contrasena.as_deref() {
        Some(plain) if !plain.is_empty() => Some(hash_password(plain)?),
        _ => None,
    };

    let usuario = Usuario::update(
        &state.db,
        id,
        &payload.nombre,
        &payload.correo,
        nueva_contrasena.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("Usuario no encontrado"))?;

    info!(usuario_id = usuario.id, "usuario updated");
    Ok(Json(usuario))
}

#[instrument(skip(state))]
pub async fn borrar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !Usuario::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Usuario no encontrado"));
    }
    info!(usuario_id = id, "usuario deleted");
    Ok(StatusCode::NO_CONTENT)
}
