//! Physical or software asset (ativo)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::taxonomy;

/// Yearly depreciation rate applied when an asset has none recorded
pub const DEFAULT_DEPRECIATION_PERCENT: f64 = 30.0;

taxonomy! {
    /// Whether an asset is in service
    pub enum AssetStatus (fallback = Active) {
        /// In service
        Active => ("ativo", "Ativo", Success),
        /// Decommissioned
        Inactive => ("inativo", "Inativo", Neutral),
        /// Under maintenance
        Maintenance => ("manutencao", "Em manutenção", Warning),
    }
}

taxonomy! {
    /// Kind of asset
    pub enum AssetKind (fallback = Hardware) {
        /// Computers, peripherals
        Hardware => ("hardware", "Hardware", Info),
        /// Installed software
        Software => ("software", "Software", Success),
        /// License
        License => ("licenca", "Licença", Accent),
        /// Other equipment
        Equipment => ("equipamento", "Equipamento", Caution),
        /// Furniture
        Furniture => ("mobiliario", "Mobiliário", Neutral),
    }
}

/// A tracked asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    /// Identifier
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    /// Asset kind
    pub tipo_ativo: AssetKind,

    /// Name
    #[serde(deserialize_with = "lenient::string")]
    pub nome: String,

    /// Serial number
    #[serde(deserialize_with = "lenient::text")]
    pub numero_serie: Option<String>,

    /// Where it is
    #[serde(deserialize_with = "lenient::text")]
    pub localizacao: Option<String>,

    /// Responsible user
    #[serde(deserialize_with = "lenient::opt_int")]
    pub responsavel_id: Option<i64>,

    /// Acquisition date
    #[serde(deserialize_with = "lenient::date")]
    pub data_aquisicao: Option<NaiveDate>,

    /// Acquisition value
    #[serde(deserialize_with = "lenient::decimal")]
    pub valor_aquisicao: Option<f64>,

    /// Yearly depreciation, in percent of the acquisition value
    #[serde(deserialize_with = "lenient::decimal")]
    pub percentual_depreciacao: Option<f64>,

    /// License expiry
    #[serde(deserialize_with = "lenient::date")]
    pub data_vencimento_licenca: Option<NaiveDate>,

    /// Status
    pub status: AssetStatus,
}

impl Asset {
    /// Display name used in alert messages
    pub fn display_name(&self) -> String {
        if self.nome.trim().is_empty() {
            format!("Ativo #{}", self.id)
        } else {
            self.nome.clone()
        }
    }
}
