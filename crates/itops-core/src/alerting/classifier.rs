//! Per-record status classification
//!
//! Every function here is pure and total: it reads one record plus the
//! evaluation date and never fails. Results are recomputed on every call and
//! must not be cached, since the same bill can cross its due date between two
//! calls.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{
    Asset, AssetStatus, Bill, DerivedStatus, InventoryItem, PaymentStatus, Ticket,
    TicketPriority, TicketStatus, DEFAULT_DEPRECIATION_PERCENT,
};

/// Days ahead in which a pending bill counts as due soon
pub const DEFAULT_BILL_DUE_SOON_DAYS: u32 = 7;

/// Days ahead in which an active license counts as expiring
pub const DEFAULT_LICENSE_EXPIRY_DAYS: u32 = 30;

/// Derived state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillClassification {
    /// Pending and past its due date
    pub overdue: bool,
    /// Pending and due between today and the horizon, inclusive
    pub due_soon: bool,
}

impl BillClassification {
    /// Overdue is critical
    ///
    /// Due soon stays informational: it is reported through `due_soon` and
    /// the summary counts, never as an alert.
    pub fn derived_status(&self) -> DerivedStatus {
        if self.overdue {
            DerivedStatus::Critical
        } else {
            DerivedStatus::None
        }
    }
}

/// Derived state of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryClassification {
    /// At or below the minimum quantity
    pub low_stock: bool,
}

impl InventoryClassification {
    /// Low stock is a warning
    pub fn derived_status(&self) -> DerivedStatus {
        if self.low_stock {
            DerivedStatus::Warning
        } else {
            DerivedStatus::None
        }
    }
}

/// Derived state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketClassification {
    /// Critical priority
    pub urgent: bool,
    /// Still in the `aberto` status
    pub open: bool,
}

impl TicketClassification {
    /// An urgent ticket nobody has picked up yet is critical
    pub fn derived_status(&self) -> DerivedStatus {
        if self.urgent && self.open {
            DerivedStatus::Critical
        } else {
            DerivedStatus::None
        }
    }
}

/// Derived state of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetClassification {
    /// Active, with a license due on or before the horizon
    pub license_expiring: bool,
    /// Active, with a license already past its date
    pub license_expired: bool,
}

impl AssetClassification {
    /// An expiring license is a warning
    pub fn derived_status(&self) -> DerivedStatus {
        if self.license_expiring {
            DerivedStatus::Warning
        } else {
            DerivedStatus::None
        }
    }
}

fn horizon(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Classify a bill with the default due-soon horizon
///
/// `overdue` holds when the due date is strictly before `today` and the bill
/// is still pending. Paid or cancelled bills are never overdue, and a bill due
/// today is not overdue yet.
pub fn classify_bill(bill: &Bill, today: NaiveDate) -> BillClassification {
    classify_bill_with(bill, today, DEFAULT_BILL_DUE_SOON_DAYS)
}

/// Classify a bill with an explicit due-soon horizon in days
pub fn classify_bill_with(bill: &Bill, today: NaiveDate, due_soon_days: u32) -> BillClassification {
    let (true, Some(due)) = (bill.status_pagamento == PaymentStatus::Pending, bill.data_vencimento) else {
        return BillClassification::default();
    };

    BillClassification {
        overdue: due < today,
        due_soon: due >= today && due <= horizon(today, due_soon_days),
    }
}

/// Classify an inventory item
///
/// Reaching the minimum already counts as low stock.
pub fn classify_inventory_item(item: &InventoryItem) -> InventoryClassification {
    InventoryClassification {
        low_stock: item.quantidade <= item.quantidade_minima,
    }
}

/// Classify a ticket
///
/// Unknown priorities were already read as `media`, so they are never urgent.
pub fn classify_ticket(ticket: &Ticket) -> TicketClassification {
    TicketClassification {
        urgent: ticket.prioridade == TicketPriority::Critical,
        open: ticket.status == TicketStatus::Open,
    }
}

/// Classify an asset's license against a horizon in days
///
/// Only active assets with a license date are considered. Licenses that have
/// already expired are also expiring.
pub fn classify_asset(asset: &Asset, today: NaiveDate, license_expiry_days: u32) -> AssetClassification {
    let (true, Some(expiry)) = (asset.status == AssetStatus::Active, asset.data_vencimento_licenca) else {
        return AssetClassification::default();
    };

    AssetClassification {
        license_expiring: expiry <= horizon(today, license_expiry_days),
        license_expired: expiry < today,
    }
}

/// Full years between two dates, zero if `to` is before `from`
fn full_years(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years.max(0)
}

/// Current book value of an asset
///
/// Straight-line depreciation of the acquisition value by the yearly rate
/// (30% when unset) for every full year since acquisition, floored at zero.
/// A negative rate counts as no depreciation, so the value never grows.
/// `None` when the acquisition value is unknown.
pub fn depreciated_value(asset: &Asset, today: NaiveDate) -> Option<f64> {
    let value = asset.valor_aquisicao?;
    let Some(acquired) = asset.data_aquisicao else {
        return Some(value);
    };

    let years = full_years(acquired, today);
    if years == 0 {
        return Some(value);
    }

    let rate = asset
        .percentual_depreciacao
        .unwrap_or(DEFAULT_DEPRECIATION_PERCENT)
        .max(0.0)
        / 100.0;
    let depreciation = (value * rate * f64::from(years)).min(value);
    Some(value - depreciation)
}
