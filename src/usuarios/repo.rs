use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record. The stored hash never reaches a JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    #[serde(skip_serializing, default)]
    pub contrasena: String,
    pub estado: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, nombre, correo, contrasena, estado, created_at, updated_at";

impl Usuario {
    /// Lookup by email, exactly as stored (no case folding).
    pub async fn find_by_correo(db: &PgPool, correo: &str) -> sqlx::Result<Option<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNS} FROM usuarios WHERE correo = $1"
        ))
        .bind(correo)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!("SELECT {COLUMNS} FROM usuarios WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!("SELECT {COLUMNS} FROM usuarios ORDER BY id"))
            .fetch_all(db)
            .await
    }

    /// Insert a new active user. `contrasena` must already be hashed.
    pub async fn create(
        db: &PgPool,
        nombre: &str,
        correo: &str,
        contrasena: &str,
    ) -> sqlx::Result<Usuario> {
        sqlx::query_as::<_, Usuario>(&format!(
            "INSERT INTO usuarios (nombre, correo, contrasena)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(nombre)
        .bind(correo)
        .bind(contrasena)
        .fetch_one(db)
        .await
    }

    /// Update nombre/correo, and the stored hash only when a new one is
    /// supplied. Returns None when the row does not exist.
    pub async fn update(
        db: &PgPool,
        id: i64,
        nombre: &str,
        correo: &str,
        contrasena: Option<&str>,
    ) -> sqlx::Result<Option<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!(
            "UPDATE usuarios
             SET nombre = $2, correo = $3, contrasena = COALESCE($4, contrasena),
                 updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(nombre)
        .bind(correo)
        .bind(contrasena)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
