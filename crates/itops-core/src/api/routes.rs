//! API routes

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))

        // Dashboard
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/dashboard/estatisticas", get(handlers::dashboard_statistics))
        .route("/api/dashboard/alertas", get(handlers::dashboard_alerts))

        // Bills
        .route("/api/contas-mensais", get(handlers::list_bills))
        .route("/api/contas-mensais/vencidas", get(handlers::overdue_bills))
        .route("/api/contas-mensais/vencendo", get(handlers::due_soon_bills))

        // Inventory
        .route("/api/inventario", get(handlers::list_inventory))
        .route("/api/inventario/estoque-baixo", get(handlers::low_stock))

        // Tickets
        .route("/api/chamados", get(handlers::list_tickets))

        // Assets
        .route("/api/ativos", get(handlers::list_assets))
        .route("/api/ativos/licencas-vencendo", get(handlers::expiring_licenses))

        // Purchases
        .route("/api/compras", get(handlers::list_purchases))

        .with_state(state)
}
