//src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod cache;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
#[cfg(test)]
mod test_support;

use crate::{config::AppState, docs::ApiDoc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new().await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/occupancy", get(handlers::occupancy::get_occupancy))
        .route("/attendance/toggle", post(handlers::attendance::toggle_attendance))
        .route("/backups"
               ,post(handlers::backups::assign_backup)
               .delete(handlers::backups::remove_backup)
        )
        .route("/critical-positions", put(handlers::postes::set_critical_position))
        .route("/postes"
               ,get(handlers::postes::list_postes)
               .post(handlers::postes::create_poste)
        )
        .route("/postes/{id}"
               ,put(handlers::postes::rename_poste)
               .delete(handlers::postes::delete_poste)
        )
        .route("/operators/{id}/assignment", put(handlers::operators::reassign_operator))
        .route("/operators/{id}", delete(handlers::operators::delete_operator));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .with_state(app_state.clone());

    let listener = TcpListener::bind(&app_state.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
