use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: i64,
    pub nombre: String,
    pub usuario_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, nombre, usuario_id, created_at, updated_at";

impl Categoria {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!("SELECT {COLUMNS} FROM categorias ORDER BY id"))
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!("SELECT {COLUMNS} FROM categorias WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list_by_usuario(db: &PgPool, usuario_id: i64) -> sqlx::Result<Vec<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!(
            "SELECT {COLUMNS} FROM categorias WHERE usuario_id = $1 ORDER BY id"
        ))
        .bind(usuario_id)
        .fetch_all(db)
        .await
    }

    pub async fn create(db: &PgPool, nombre: &str, usuario_id: i64) -> sqlx::Result<Categoria> {
        sqlx::query_as::<_, Categoria>(&format!(
            "INSERT INTO categorias (nombre, usuario_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        ))
        .bind(nombre)
        .bind(usuario_id)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, id: i64, nombre: &str) -> sqlx::Result<Option<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!(
            "UPDATE categorias SET nombre = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(nombre)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
