//! Support ticket (chamado)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::{taxonomy, Taxonomy, Tone};

taxonomy! {
    /// Lifecycle status of a ticket
    pub enum TicketStatus (fallback = Open) {
        /// Newly opened
        Open => ("aberto", "Aberto", Danger),
        /// Being worked on
        InProgress => ("em_andamento", "Em andamento", Warning),
        /// Waiting on the requester or a third party
        Waiting => ("aguardando", "Aguardando", Info),
        /// Solved, pending closure
        Resolved => ("resolvido", "Resolvido", Success),
        /// Closed
        Closed => ("fechado", "Fechado", Neutral),
    }
}

/// Ticket priority
///
/// Unlike the other taxonomies, unknown priorities are not kept: they are
/// read as [`TicketPriority::Medium`] for both classification and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "Option<serde_json::Value>", into = "String")]
pub enum TicketPriority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl Taxonomy for TicketPriority {
    const KNOWN: &'static [&'static str] = &["baixa", "media", "alta", "critica"];

    fn as_str(&self) -> &str {
        match self {
            Self::Low => "baixa",
            Self::Medium => "media",
            Self::High => "alta",
            Self::Critical => "critica",
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
            Self::Critical => "Crítica",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Success,
            Self::Medium => Tone::Warning,
            Self::High => Tone::Caution,
            Self::Critical => Tone::Danger,
        }
    }

    fn is_known(&self) -> bool {
        true
    }
}

impl From<&str> for TicketPriority {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "baixa" => Self::Low,
            "alta" => Self::High,
            "critica" => Self::Critical,
            _ => Self::Medium,
        }
    }
}

impl From<Option<String>> for TicketPriority {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Self::from).unwrap_or_default()
    }
}

impl From<Option<serde_json::Value>> for TicketPriority {
    fn from(raw: Option<serde_json::Value>) -> Self {
        Self::from(raw.as_ref().and_then(lenient::scalar_text))
    }
}

impl From<TicketPriority> for String {
    fn from(priority: TicketPriority) -> Self {
        priority.as_str().to_string()
    }
}

/// A support ticket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    /// Identifier
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    /// Human ticket number, `YYYY-NNNNNN`
    #[serde(deserialize_with = "lenient::string")]
    pub numero_chamado: String,

    /// Title
    #[serde(deserialize_with = "lenient::string")]
    pub titulo: String,

    /// Priority
    pub prioridade: TicketPriority,

    /// Status
    pub status: TicketStatus,

    /// Category
    #[serde(deserialize_with = "lenient::text")]
    pub categoria: Option<String>,

    /// Assigned technician
    #[serde(deserialize_with = "lenient::opt_int")]
    pub tecnico_atribuido_id: Option<i64>,

    /// When it was opened
    #[serde(deserialize_with = "lenient::date")]
    pub data_abertura: Option<NaiveDate>,
}

impl Ticket {
    /// Ticket number, or the id when the number is missing
    pub fn display_number(&self) -> String {
        if self.numero_chamado.trim().is_empty() {
            format!("#{}", self.id)
        } else {
            self.numero_chamado.clone()
        }
    }
}
