//! Stock inventory item

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::taxonomy;

taxonomy! {
    /// Kind of inventory item
    pub enum InventoryKind (fallback = Hardware) {
        /// Physical stock
        Hardware => ("hardware", "Hardware", Info),
        /// Subscription license seats
        PeriodicLicense => ("licenca_periodica", "Licença periódica", Accent),
        /// Perpetual license seats
        PerpetualLicense => ("licenca_perpetua", "Licença perpétua", Success),
    }
}

/// An item kept in stock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    /// Identifier
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    /// Item name
    #[serde(deserialize_with = "lenient::string")]
    pub nome: String,

    /// Item kind
    pub tipo_item: InventoryKind,

    /// Free-form description
    #[serde(deserialize_with = "lenient::text")]
    pub descricao: Option<String>,

    /// Units in stock
    #[serde(deserialize_with = "lenient::int")]
    pub quantidade: i64,

    /// Minimum units before the item is short
    #[serde(deserialize_with = "lenient::int")]
    pub quantidade_minima: i64,

    /// Storage location
    #[serde(deserialize_with = "lenient::text")]
    pub localizacao: Option<String>,

    /// Unit price
    #[serde(deserialize_with = "lenient::decimal")]
    pub valor_unitario: Option<f64>,

    /// License expiry for license kinds
    #[serde(deserialize_with = "lenient::date")]
    pub data_vencimento_licenca: Option<NaiveDate>,
}

impl InventoryItem {
    /// Display name used in alert messages
    pub fn display_name(&self) -> String {
        if self.nome.trim().is_empty() {
            format!("Item #{}", self.id)
        } else {
            self.nome.clone()
        }
    }
}
