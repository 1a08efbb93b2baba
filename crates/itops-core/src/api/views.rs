//! Listing payloads
//!
//! Each record is returned as stored, flattened, with its derived indicators
//! alongside so clients never recompute them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::alerting::{classify_inventory_item, classify_ticket, depreciated_value, AlertAggregator};
use crate::models::{
    Asset, Bill, DerivedStatus, InventoryItem, Purchase, Taxonomy, Ticket, Tone,
};

/// Badge tone of a record: its status tone unless the derived status overrides it
fn tone_for(derived: DerivedStatus, base: Tone) -> Tone {
    match derived {
        DerivedStatus::Critical => Tone::Danger,
        DerivedStatus::Warning => Tone::Warning,
        DerivedStatus::None => base,
    }
}

/// A bill with its derived status
#[derive(Debug, Clone, Serialize)]
pub struct BillView {
    /// Stored record
    #[serde(flatten)]
    pub bill: Bill,
    /// Pending and past due
    pub vencida: bool,
    /// Pending and due within the horizon
    pub vencendo: bool,
    /// Derived status
    pub situacao: DerivedStatus,
    /// Badge tone
    pub tom: Tone,
}

impl BillView {
    /// Annotate a record
    pub fn new(bill: Bill, aggregator: &AlertAggregator, today: NaiveDate) -> Self {
        let classification = aggregator.classify_bill(&bill, today);
        let situacao = classification.derived_status();
        Self {
            vencida: classification.overdue,
            vencendo: classification.due_soon,
            situacao,
            tom: tone_for(situacao, bill.status_pagamento.tone()),
            bill,
        }
    }
}

/// An inventory item with its stock indicator
#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    /// Stored record
    #[serde(flatten)]
    pub item: InventoryItem,
    /// At or below the minimum quantity
    pub estoque_baixo: bool,
    /// Derived status
    pub situacao: DerivedStatus,
    /// Badge tone
    pub tom: Tone,
}

impl InventoryView {
    /// Annotate a record
    pub fn new(item: InventoryItem) -> Self {
        let classification = classify_inventory_item(&item);
        let situacao = classification.derived_status();
        Self {
            estoque_baixo: classification.low_stock,
            situacao,
            tom: tone_for(situacao, item.tipo_item.tone()),
            item,
        }
    }
}

/// A ticket with its urgency
#[derive(Debug, Clone, Serialize)]
pub struct TicketView {
    /// Stored record
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Critical priority
    pub urgente: bool,
    /// Derived status
    pub situacao: DerivedStatus,
    /// Badge tone
    pub tom: Tone,
}

impl TicketView {
    /// Annotate a record
    pub fn new(ticket: Ticket) -> Self {
        let classification = classify_ticket(&ticket);
        Self {
            urgente: classification.urgent,
            situacao: classification.derived_status(),
            tom: ticket.status.tone(),
            ticket,
        }
    }
}

/// An asset with license and depreciation indicators
#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    /// Stored record
    #[serde(flatten)]
    pub asset: Asset,
    /// Active and license ends within the horizon
    pub licenca_vencendo: bool,
    /// Active and license already ended
    pub licenca_vencida: bool,
    /// Current book value
    pub valor_depreciado: Option<f64>,
    /// Derived status
    pub situacao: DerivedStatus,
    /// Badge tone
    pub tom: Tone,
}

impl AssetView {
    /// Annotate a record
    pub fn new(asset: Asset, aggregator: &AlertAggregator, today: NaiveDate) -> Self {
        let classification = aggregator.classify_asset(&asset, today);
        let situacao = classification.derived_status();
        Self {
            licenca_vencendo: classification.license_expiring,
            licenca_vencida: classification.license_expired,
            valor_depreciado: depreciated_value(&asset, today),
            situacao,
            tom: tone_for(situacao, asset.status.tone()),
            asset,
        }
    }
}

/// A purchase order with its badge tone
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseView {
    /// Stored record
    #[serde(flatten)]
    pub purchase: Purchase,
    /// Badge tone
    pub tom: Tone,
}

impl PurchaseView {
    /// Annotate a record
    pub fn new(purchase: Purchase) -> Self {
        Self {
            tom: purchase.status.tone(),
            purchase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bill_view_flattens_record() {
        let bill = Bill {
            id: 3,
            tipo_conta: "Energia".to_string(),
            data_vencimento: Some(date(2024, 1, 1)),
            status_pagamento: PaymentStatus::Pending,
            ..Default::default()
        };
        let view = BillView::new(bill, &AlertAggregator::default(), date(2024, 1, 2));
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["id"], json!(3));
        assert_eq!(value["status_pagamento"], json!("pendente"));
        assert_eq!(value["vencida"], json!(true));
        assert_eq!(value["vencendo"], json!(false));
        assert_eq!(value["situacao"], json!("critico"));
        assert_eq!(value["tom"], json!("danger"));
    }

    #[test]
    fn test_paid_bill_keeps_status_tone() {
        let bill = Bill {
            data_vencimento: Some(date(2024, 1, 1)),
            status_pagamento: PaymentStatus::Paid,
            ..Default::default()
        };
        let view = BillView::new(bill, &AlertAggregator::default(), date(2024, 1, 2));
        assert_eq!(view.situacao, DerivedStatus::None);
        assert_eq!(view.tom, Tone::Success);
    }

    #[test]
    fn test_due_soon_bill_is_flagged_but_not_escalated() {
        let bill = Bill {
            data_vencimento: Some(date(2024, 1, 5)),
            status_pagamento: PaymentStatus::Pending,
            ..Default::default()
        };
        let view = BillView::new(bill, &AlertAggregator::default(), date(2024, 1, 2));
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["vencendo"], json!(true));
        assert_eq!(value["vencida"], json!(false));
        assert_eq!(value["situacao"], json!("normal"));
        assert_eq!(view.tom, Tone::Warning);
    }

    #[test]
    fn test_inventory_view_low_stock() {
        let item = InventoryItem {
            quantidade: 5,
            quantidade_minima: 5,
            ..Default::default()
        };
        let view = InventoryView::new(item);
        assert!(view.estoque_baixo);
        assert_eq!(view.tom, Tone::Warning);
    }
}
