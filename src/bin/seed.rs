//! Demo data loader: two users, a category and a product for each.

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::info;

use catalogo_api::{
    auth::password::hash_password, categorias::repo::Categoria, productos::repo::Producto,
    state::AppState, usuarios::repo::Usuario,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let state = AppState::init().await?;
    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .context("run database migrations")?;

    let demo = [
        ("Usuario1", "usuario1@example.com", "password1", "Categoría1", "Producto1", "10.99"),
        ("Usuario2", "usuario2@example.com", "password2", "Categoría2", "Producto2", "19.99"),
    ];

    for (nombre, correo, contrasena, categoria, producto, precio) in demo {
        if Usuario::find_by_correo(&state.db, correo).await?.is_some() {
            info!(correo, "already seeded, skipping");
            continue;
        }

        let hash = hash_password(contrasena)?;
        let usuario = Usuario::create(&state.db, nombre, correo, &hash).await?;
        let categoria = Categoria::create(&state.db, categoria, usuario.id).await?;
        let precio: Decimal = precio.parse().context("parse precio")?;
        Producto::create(&state.db, producto, precio, true, categoria.id, usuario.id).await?;

        info!(usuario_id = usuario.id, correo, "seeded usuario with categoria and producto");
    }

    info!("demo data ready");
    Ok(())
}
