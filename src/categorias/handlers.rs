use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{auth::guard::AuthUser, error::ApiError, state::AppState};

use super::dto::CategoriaRequest;
use super::repo::Categoria;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/usuario/:usuario_id", get(por_usuario))
        .route("/:id", get(obtener).put(actualizar).delete(borrar))
}

#[instrument(skip(state))]
pub async fn listar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<Categoria>>, ApiError> {
    let categorias = Categoria::list(&state.db).await?;
    Ok(Json(categorias))
}

#[instrument(skip(state))]
pub async fn obtener(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Categoria>, ApiError> {
    let categoria = Categoria::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Categoría no encontrada"))?;
    Ok(Json(categoria))
}

#[instrument(skip(state))]
pub async fn por_usuario(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(usuario_id): Path<i64>,
) -> Result<Json<Vec<Categoria>>, ApiError> {
    let categorias = Categoria::list_by_usuario(&state.db, usuario_id).await?;
    Ok(Json(categorias))
}

#[instrument(skip(state, payload))]
pub async fn crear(
    State(state): State<AppState>,
    AuthUser(usuario_id): AuthUser,
    Json(payload): Json<CategoriaRequest>,
) -> Result<(StatusCode, Json<Categoria>), ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    let categoria = Categoria::create(&state.db, &payload.nombre, usuario_id).await?;

    info!(categoria_id = categoria.id, usuario_id, "categoria created");
    Ok((StatusCode::CREATED, Json(categoria)))
}

#[instrument(skip(state, payload))]
pub async fn actualizar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoriaRequest>,
) -> Result<Json<Categoria>, ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    let categoria = Categoria::update(&state.db, id, &payload.nombre)
        .await?
        .ok_or(ApiError::NotFound("Categoría no encontrada"))?;

    info!(categoria_id = categoria.id, "categoria updated");
    Ok(Json(categoria))
}

#[instrument(skip(state))]
pub async fn borrar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !Categoria::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Categoría no encontrada"));
    }
    info!(categoria_id = id, "categoria deleted");
    Ok(StatusCode::NO_CONTENT)
}
