use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::guard::AuthUser, categorias::repo::Categoria, error::ApiError, state::AppState,
    usuarios::repo::Usuario,
};

use super::dto::{ActualizarProductoRequest, CrearProductoRequest};
use super::repo::Producto;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/categoria/:categoria_id", get(por_categoria))
        .route("/usuario/:usuario_id", get(por_usuario))
        .route("/:id", get(obtener).put(actualizar).delete(borrar))
}

#[instrument(skip(state))]
pub async fn listar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<Producto>>, ApiError> {
    let productos = Producto::list(&state.db).await?;
    Ok(Json(productos))
}

#[instrument(skip(state))]
pub async fn obtener(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Producto>, ApiError> {
    let producto = Producto::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Producto no encontrado"))?;
    Ok(Json(producto))
}

#[instrument(skip(state))]
pub async fn por_categoria(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(categoria_id): Path<i64>,
) -> Result<Json<Vec<Producto>>, ApiError> {
    if Categoria::find_by_id(&state.db, categoria_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Categoría no encontrada"));
    }
    let productos = Producto::list_by_categoria(&state.db, categoria_id).await?;
    Ok(Json(productos))
}

#[instrument(skip(state))]
pub async fn por_usuario(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(usuario_id): Path<i64>,
) -> Result<Json<Vec<Producto>>, ApiError> {
    let productos = Producto::list_by_usuario(&state.db, usuario_id).await?;
    Ok(Json(productos))
}

#[instrument(skip(state, payload))]
pub async fn crear(
    State(state): State<AppState>,
    AuthUser(usuario_id): AuthUser,
    Json(payload): Json<CrearProductoRequest>,
) -> Result<(StatusCode, Json<Producto>), ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    // The category must exist and the token's user must still exist; a token
    // can outlive its user since tokens never expire.
    let categoria = Categoria::find_by_id(&state.db, payload.categoria_id).await?;
    let usuario = Usuario::find_by_id(&state.db, usuario_id).await?;
    if categoria.is_none() || usuario.is_none() {
        warn!(
            categoria_id = payload.categoria_id,
            usuario_id, "producto create with missing categoria or usuario"
        );
        return Err(ApiError::BadRequest("Categoría o usuario no encontrados"));
    }

    let producto = Producto::create(
        &state.db,
        &payload.nombre,
        payload.precio_unitario,
        payload.estado,
        payload.categoria_id,
        usuario_id,
    )
    .await?;

    info!(producto_id = producto.id, usuario_id, "producto created");
    Ok((StatusCode::CREATED, Json(producto)))
}

#[instrument(skip(state, payload))]
pub async fn actualizar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarProductoRequest>,
) -> Result<Json<Producto>, ApiError> {
    payload.validar().map_err(ApiError::Validation)?;

    let producto = Producto::update(
        &state.db,
        id,
        &payload.nombre,
        payload.precio_unitario,
        payload.estado,
    )
    .await?
    .ok_or(ApiError::NotFound("Producto no encontrado"))?;

    info!(producto_id = producto.id, "producto updated");
    Ok(Json(producto))
}

#[instrument(skip(state))]
pub async fn borrar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !Producto::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Producto no encontrado"));
    }
    info!(producto_id = id, "producto deleted");
    Ok(StatusCode::NO_CONTENT)
}
