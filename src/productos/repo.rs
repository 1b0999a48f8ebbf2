use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub precio_unitario: Decimal,
    pub estado: bool,
    pub categoria_id: i64,
    pub usuario_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str =
    "id, nombre, precio_unitario, estado, categoria_id, usuario_id, created_at, updated_at";

impl Producto {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Producto>> {
        sqlx::query_as::<_, Producto>(&format!("SELECT {COLUMNS} FROM productos ORDER BY id"))
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Producto>> {
        sqlx::query_as::<_, Producto>(&format!("SELECT {COLUMNS} FROM productos WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list_by_categoria(db: &PgPool, categoria_id: i64) -> sqlx::Result<Vec<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "SELECT {COLUMNS} FROM productos WHERE categoria_id = $1 ORDER BY id"
        ))
        .bind(categoria_id)
        .fetch_all(db)
        .await
    }

    pub async fn list_by_usuario(db: &PgPool, usuario_id: i64) -> sqlx::Result<Vec<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "SELECT {COLUMNS} FROM productos WHERE usuario_id = $1 ORDER BY id"
        ))
        .bind(usuario_id)
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        nombre: &str,
        precio_unitario: Decimal,
        estado: bool,
        categoria_id: i64,
        usuario_id: i64,
    ) -> sqlx::Result<Producto> {
        sqlx::query_as::<_, Producto>(&format!(
            "INSERT INTO productos (nombre, precio_unitario, estado, categoria_id, usuario_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(nombre)
        .bind(precio_unitario)
        .bind(estado)
        .bind(categoria_id)
        .bind(usuario_id)
        .fetch_one(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        id: i64,
        nombre: &str,
        precio_unitario: Decimal,
        estado: bool,
    ) -> sqlx::Result<Option<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "UPDATE productos
             SET nombre = $2, precio_unitario = $3, estado = $4, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(nombre)
        .bind(precio_unitario)
        .bind(estado)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn serialization_uses_camel_case_and_decimal_string() {
        let producto = Producto {
            id: 1,
            nombre: "Producto1".into(),
            precio_unitario: "10.99".parse().unwrap(),
            estado: true,
            categoria_id: 2,
            usuario_id: 3,
            created_at: datetime!(2023-09-12 17:08:39 UTC),
            updated_at: datetime!(2023-09-12 17:08:39 UTC),
        };
        let json = serde_json::to_value(producto).unwrap();
        assert_eq!(json["precioUnitario"], "10.99");
        assert_eq!(json["categoriaId"], 2);
        assert_eq!(json["usuarioId"], 3);
    }
}
