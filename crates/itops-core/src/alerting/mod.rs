//! Derived-status classification and dashboard alert aggregation
//!
//! [`classifier`] turns one record plus the evaluation date into a derived
//! status; [`aggregator`] rolls those up across every module into the
//! dashboard summary and alert feed. Neither performs I/O.

pub mod aggregator;
pub mod classifier;

pub use aggregator::{build_alerts, build_summary, AlertAggregator};
pub use classifier::{
    classify_asset, classify_bill, classify_bill_with, classify_inventory_item, classify_ticket,
    depreciated_value, AssetClassification, BillClassification, InventoryClassification,
    TicketClassification,
};
