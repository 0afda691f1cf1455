mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging (verboso solo fuera de producción)
    let log_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🔧 Vehicle Service Shop - Backend API");
    info!("=====================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    database::init_schema(&pool).await?;
    info!("✅ Esquema de base de datos verificado");

    let app_state = AppState::new(pool, config.clone());

    // Rutas protegidas por JWT
    let protected = Router::new()
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/service", routes::service_routes::create_service_router())
        .nest("/api/invoice", routes::invoice_routes::create_invoice_router())
        .nest("/api/reminder", routes::reminder_routes::create_reminder_router())
        .nest("/api/document", routes::document_routes::create_document_router())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // CORS: permisivo salvo que haya orígenes explícitos configurados
    let cors = if config.cors_origins.iter().any(|origin| origin == "*") {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(protected)
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Registrar vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo (soft-delete)");
    info!("   GET  /api/vehicle/:id/health - Puntaje de salud del vehículo");
    info!("🔧 Endpoints - Service:");
    info!("   POST /api/service/request - Enviar solicitud de servicio");
    info!("   GET  /api/service/request - Listar solicitudes");
    info!("   GET  /api/service/request/:id - Obtener solicitud");
    info!("   PUT  /api/service/request/:id/status - Transicionar estado");
    info!("   POST /api/service/request/:id/complete - Completar servicio");
    info!("   POST /api/service/request/:id/mark-paid - Registrar pago en caja");
    info!("   GET  /api/service/history/:vehicle_id - Historial de servicios");
    info!("💵 Endpoints - Invoice:");
    info!("   GET  /api/invoice/:id - Obtener factura");
    info!("   POST /api/invoice/:id/pay - Pagar factura (simulado)");
    info!("🔔 Endpoints - Reminder:");
    info!("   GET  /api/reminder/due - Recordatorios vencidos/por vencer");
    info!("📄 Endpoints - Document:");
    info!("   POST /api/document - Registrar documento");
    info!("   GET  /api/document/vehicle/:vehicle_id - Documentos del vehículo");
    info!("   GET  /api/document/expiring - Documentos por vencer");
    info!("   DELETE /api/document/:id - Eliminar documento");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple, sin autenticación
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle_service",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
