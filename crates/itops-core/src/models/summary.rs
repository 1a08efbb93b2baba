//! Dashboard summary models

use std::collections::BTreeMap;

use serde::Serialize;

use super::alert::{Alert, Module};

/// Statistics for one module
///
/// Serializes as one flat object: `total`, then a count per known status
/// value, then the derived indicators, e.g.
/// `{"total": 3, "pendente": 2, "pago": 1, "vencido": 0, "cancelado": 0,
/// "vencidas": 1, "vencendo": 0}`. Status values and indicator names never
/// collide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    /// Number of records in the collection
    pub total: usize,

    /// Records per known value of the module's primary status field
    ///
    /// Every known value has an entry. Records with unknown values are only
    /// counted in `total`.
    #[serde(flatten)]
    pub by_status: BTreeMap<String, usize>,

    /// Derived indicators (overdue, low stock, ...); may overlap `by_status`
    #[serde(flatten)]
    pub highlights: BTreeMap<String, usize>,
}

impl ModuleSummary {
    /// Count for a status value, zero when absent
    pub fn status(&self, value: &str) -> usize {
        self.by_status.get(value).copied().unwrap_or(0)
    }

    /// Count for a highlight, zero when absent
    pub fn highlight(&self, name: &str) -> usize {
        self.highlights.get(name).copied().unwrap_or(0)
    }

    /// Records whose status is outside the known set
    pub fn unclassified(&self) -> usize {
        self.total.saturating_sub(self.by_status.values().sum())
    }
}

/// Per-module statistics for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Purchase orders
    pub compras: ModuleSummary,
    /// Support tickets
    pub chamados: ModuleSummary,
    /// Assets
    pub ativos: ModuleSummary,
    /// Stock inventory
    pub inventario: ModuleSummary,
    /// Monthly bills
    pub contas_mensais: ModuleSummary,
}

impl DashboardSummary {
    /// Summary of one module
    pub fn module(&self, module: Module) -> &ModuleSummary {
        match module {
            Module::Purchases => &self.compras,
            Module::Tickets => &self.chamados,
            Module::Assets => &self.ativos,
            Module::Inventory => &self.inventario,
            Module::Bills => &self.contas_mensais,
        }
    }
}

/// Summary and alerts computed from one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Per-module statistics
    #[serde(rename = "estatisticas")]
    pub summary: DashboardSummary,

    /// Alerts, most severe first
    #[serde(rename = "alertas")]
    pub alerts: Vec<Alert>,
}
