//! Recurring monthly bill (conta mensal)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::taxonomy;

taxonomy! {
    /// Payment status of a bill
    pub enum PaymentStatus (fallback = Pending) {
        /// Awaiting payment
        Pending => ("pendente", "Pendente", Warning),
        /// Paid
        Paid => ("pago", "Pago", Success),
        /// Marked overdue by an operator
        Overdue => ("vencido", "Vencido", Danger),
        /// Cancelled
        Cancelled => ("cancelado", "Cancelado", Neutral),
    }
}

/// A recurring monthly bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bill {
    /// Identifier
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    /// Kind of bill (internet, telephony, software subscription, ...)
    #[serde(deserialize_with = "lenient::string")]
    pub tipo_conta: String,

    /// Supplier
    #[serde(deserialize_with = "lenient::opt_int")]
    pub fornecedor_id: Option<i64>,

    /// Cost center
    #[serde(deserialize_with = "lenient::opt_int")]
    pub centro_custo_id: Option<i64>,

    /// Amount
    #[serde(deserialize_with = "lenient::decimal")]
    pub valor: Option<f64>,

    /// Due date
    #[serde(deserialize_with = "lenient::date")]
    pub data_vencimento: Option<NaiveDate>,

    /// Payment status
    pub status_pagamento: PaymentStatus,

    /// Recurrence (mensal, anual, ...)
    #[serde(deserialize_with = "lenient::text")]
    pub recorrencia: Option<String>,

    /// Free-form description
    #[serde(deserialize_with = "lenient::text")]
    pub descricao: Option<String>,

    /// When it was paid
    #[serde(deserialize_with = "lenient::date")]
    pub data_pagamento: Option<NaiveDate>,
}

impl Bill {
    /// Display name used in alert messages
    pub fn display_name(&self) -> String {
        if self.tipo_conta.trim().is_empty() {
            format!("#{}", self.id)
        } else {
            self.tipo_conta.clone()
        }
    }
}
