//! Alert data models

use serde::{Deserialize, Serialize, Serializer};

/// Alert severity level
///
/// Ordered so that `Critical > Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Needs attention
    #[serde(rename = "aviso")]
    Warning,
    /// Needs action now
    #[serde(rename = "critico")]
    Critical,
}

/// Secondary status derived from a record at read time, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DerivedStatus {
    /// Nothing to report
    #[default]
    #[serde(rename = "normal")]
    None,
    /// Warning level
    #[serde(rename = "aviso")]
    Warning,
    /// Critical level
    #[serde(rename = "critico")]
    Critical,
}

impl DerivedStatus {
    /// Alert severity for this status, if it warrants an alert
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::None => None,
            Self::Warning => Some(Severity::Warning),
            Self::Critical => Some(Severity::Critical),
        }
    }
}

/// Console module an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Module {
    /// Purchase orders
    Purchases,
    /// Support tickets
    Tickets,
    /// Assets
    Assets,
    /// Stock inventory
    Inventory,
    /// Recurring monthly bills
    Bills,
}

impl Module {
    /// Every module, in dashboard order
    pub const ALL: [Module; 5] = [
        Module::Purchases,
        Module::Tickets,
        Module::Assets,
        Module::Inventory,
        Module::Bills,
    ];

    /// Key used in summaries and snapshot files
    pub fn key(self) -> &'static str {
        match self {
            Self::Purchases => "compras",
            Self::Tickets => "chamados",
            Self::Assets => "ativos",
            Self::Inventory => "inventario",
            Self::Bills => "contas_mensais",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Purchases => "Compras",
            Self::Tickets => "Chamados",
            Self::Assets => "Ativos",
            Self::Inventory => "Inventário",
            Self::Bills => "Contas Mensais",
        }
    }

    /// Path segment of the module's collection endpoint
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Bills => "contas-mensais",
            other => other.key(),
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Module {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl TryFrom<String> for Module {
    type Error = String;

    /// Accepts a key, label or API path
    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Module::ALL
            .into_iter()
            .find(|m| raw == m.key() || raw == m.label() || raw == m.api_path())
            .ok_or_else(|| format!("unknown module: {raw}"))
    }
}

/// A dashboard alert
///
/// Created fresh on every aggregation; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Human-readable message
    #[serde(rename = "mensagem")]
    pub message: String,

    /// Severity level
    #[serde(rename = "tipo")]
    pub severity: Severity,

    /// Module the entity belongs to
    #[serde(rename = "modulo")]
    pub module: Module,
}

impl Alert {
    /// Create a critical alert
    pub fn critical(module: Module, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Critical,
            module,
        }
    }

    /// Create a warning alert
    pub fn warning(module: Module, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            module,
        }
    }
}
