//! API handlers for the HTTP REST API

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::alerting::AlertAggregator;
use crate::clock::Clock;
use crate::error::Error;
use crate::gateway::SnapshotSource;
use crate::models::{Alert, Dashboard, DashboardSummary, Snapshot, Taxonomy};

use super::views::{AssetView, BillView, InventoryView, PurchaseView, TicketView};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Where module collections are read from
    pub source: Arc<dyn SnapshotSource>,
    /// Evaluation date
    pub clock: Arc<dyn Clock>,
    /// Summary and alert builder
    pub aggregator: AlertAggregator,
}

impl AppState {
    /// Fetch a fresh snapshot together with the evaluation date
    async fn load(&self) -> Result<(Snapshot, NaiveDate), Error> {
        let snapshot = self.source.fetch_snapshot().await?;
        let today = self.clock.today();
        debug!(source = %self.source.describe(), %today, "Loaded snapshot for request");
        Ok((snapshot, today))
    }
}

/// Error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    erro: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_upstream() {
            warn!(error = %self, "Data source unavailable");
            StatusCode::BAD_GATEWAY
        } else {
            error!(error = %self, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ErrorBody { erro: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, Error>;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Dashboard
// ============================================================================

/// Per-module statistics
pub async fn dashboard_statistics(State(state): State<AppState>) -> ApiResult<DashboardSummary> {
    let (snapshot, today) = state.load().await?;
    Ok(Json(state.aggregator.build_summary(&snapshot, today)))
}

/// Alert feed, critical first
pub async fn dashboard_alerts(State(state): State<AppState>) -> ApiResult<Vec<Alert>> {
    let (snapshot, today) = state.load().await?;
    Ok(Json(state.aggregator.build_alerts(&snapshot, today)))
}

/// Statistics and alerts computed from one snapshot
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Dashboard> {
    let (snapshot, today) = state.load().await?;
    Ok(Json(state.aggregator.build_dashboard(&snapshot, today)))
}

// ============================================================================
// Module listings
// ============================================================================

/// Query parameters for listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Keep only records with this status value
    pub status: Option<String>,
}

impl ListQuery {
    fn matches(&self, value: &impl Taxonomy) -> bool {
        self.status
            .as_deref()
            .map_or(true, |wanted| value.as_str() == wanted)
    }
}

/// Query parameters for the ticket listing
#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    /// Keep only tickets with this status value
    pub status: Option<String>,
    /// Keep only tickets with this priority value
    pub prioridade: Option<String>,
}

/// Bills with derived status
pub async fn list_bills(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<BillView>> {
    let (snapshot, today) = state.load().await?;
    let bills = snapshot
        .contas_mensais
        .into_iter()
        .filter(|b| query.matches(&b.status_pagamento))
        .map(|b| BillView::new(b, &state.aggregator, today))
        .collect();
    Ok(Json(bills))
}

async fn bills_where(state: &AppState, keep: impl Fn(&BillView) -> bool) -> ApiResult<Vec<BillView>> {
    let (snapshot, today) = state.load().await?;
    let mut bills: Vec<BillView> = snapshot
        .contas_mensais
        .into_iter()
        .map(|b| BillView::new(b, &state.aggregator, today))
        .filter(|v| keep(v))
        .collect();
    bills.sort_by_key(|v| v.bill.data_vencimento);
    Ok(Json(bills))
}

/// Pending bills past their due date, earliest first
pub async fn overdue_bills(State(state): State<AppState>) -> ApiResult<Vec<BillView>> {
    bills_where(&state, |v| v.vencida).await
}

/// Pending bills due within the horizon, earliest first
pub async fn due_soon_bills(State(state): State<AppState>) -> ApiResult<Vec<BillView>> {
    bills_where(&state, |v| v.vencendo).await
}

/// Inventory with stock indicator
pub async fn list_inventory(State(state): State<AppState>) -> ApiResult<Vec<InventoryView>> {
    let (snapshot, _) = state.load().await?;
    Ok(Json(snapshot.inventario.into_iter().map(InventoryView::new).collect()))
}

/// Items at or below their minimum quantity
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Vec<InventoryView>> {
    let (snapshot, _) = state.load().await?;
    let items = snapshot
        .inventario
        .into_iter()
        .map(InventoryView::new)
        .filter(|v| v.estoque_baixo)
        .collect();
    Ok(Json(items))
}

/// Tickets with urgency
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> ApiResult<Vec<TicketView>> {
    let (snapshot, _) = state.load().await?;
    let tickets = snapshot
        .chamados
        .into_iter()
        .filter(|t| query.status.as_deref().map_or(true, |s| t.status.as_str() == s))
        .filter(|t| {
            query
                .prioridade
                .as_deref()
                .map_or(true, |p| t.prioridade.as_str() == p)
        })
        .map(TicketView::new)
        .collect();
    Ok(Json(tickets))
}

/// Assets with license and depreciation indicators
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<AssetView>> {
    let (snapshot, today) = state.load().await?;
    let assets = snapshot
        .ativos
        .into_iter()
        .filter(|a| query.matches(&a.status))
        .map(|a| AssetView::new(a, &state.aggregator, today))
        .collect();
    Ok(Json(assets))
}

/// Active assets whose license expires within the horizon, soonest first
pub async fn expiring_licenses(State(state): State<AppState>) -> ApiResult<Vec<AssetView>> {
    let (snapshot, today) = state.load().await?;
    let mut assets: Vec<AssetView> = snapshot
        .ativos
        .into_iter()
        .map(|a| AssetView::new(a, &state.aggregator, today))
        .filter(|v| v.licenca_vencendo)
        .collect();
    assets.sort_by_key(|v| v.asset.data_vencimento_licenca);
    Ok(Json(assets))
}

/// Purchase orders
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PurchaseView>> {
    let (snapshot, _) = state.load().await?;
    let purchases = snapshot
        .compras
        .into_iter()
        .filter(|p| query.matches(&p.status))
        .map(PurchaseView::new)
        .collect();
    Ok(Json(purchases))
}
