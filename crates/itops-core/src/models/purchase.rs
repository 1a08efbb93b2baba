//! Purchase order (compra)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::taxonomy;

taxonomy! {
    /// Status of a purchase order
    pub enum PurchaseStatus (fallback = Requested) {
        /// Requested, awaiting approval
        Requested => ("solicitado", "Solicitado", Warning),
        /// Approved
        Approved => ("aprovado", "Aprovado", Info),
        /// Ordered, in transit
        InProgress => ("em_andamento", "Em andamento", Accent),
        /// Delivered
        Delivered => ("entregue", "Entregue", Success),
        /// Cancelled
        Cancelled => ("cancelado", "Cancelado", Danger),
    }
}

/// A purchase order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purchase {
    /// Identifier
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    /// Order number, `PC-YYYY-NNNN`
    #[serde(deserialize_with = "lenient::text")]
    pub numero_pedido: Option<String>,

    /// What is being bought
    #[serde(deserialize_with = "lenient::string")]
    pub descricao: String,

    /// Order total
    #[serde(deserialize_with = "lenient::decimal")]
    pub valor_total: Option<f64>,

    /// Status
    pub status: PurchaseStatus,

    /// Supplier
    #[serde(deserialize_with = "lenient::opt_int")]
    pub fornecedor_id: Option<i64>,

    /// Cost center
    #[serde(deserialize_with = "lenient::opt_int")]
    pub centro_custo_id: Option<i64>,

    /// When it was requested
    #[serde(deserialize_with = "lenient::date")]
    pub data_solicitacao: Option<NaiveDate>,

    /// When it was acquired
    #[serde(deserialize_with = "lenient::date")]
    pub data_aquisicao: Option<NaiveDate>,
}
