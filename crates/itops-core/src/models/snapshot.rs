//! One consistent read of every module collection

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{Asset, Bill, InventoryItem, Module, Purchase, Ticket};

/// All module collections, in the order the backend returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Purchase orders
    pub compras: Vec<Purchase>,
    /// Support tickets
    pub chamados: Vec<Ticket>,
    /// Assets
    pub ativos: Vec<Asset>,
    /// Stock inventory
    pub inventario: Vec<InventoryItem>,
    /// Monthly bills
    pub contas_mensais: Vec<Bill>,

    /// Elements dropped while decoding because they were not records
    #[serde(skip)]
    pub rejected: usize,
}

impl Snapshot {
    /// Decode one module's raw collection into the snapshot
    ///
    /// `raw` must be a JSON array; anything else is a validation error. Array
    /// elements that cannot be read as a record are skipped and counted in
    /// [`Snapshot::rejected`] so the rest of the collection still loads.
    pub fn ingest(&mut self, module: Module, raw: Value) -> Result<()> {
        let rejected = match module {
            Module::Purchases => decode_into(module, raw, &mut self.compras)?,
            Module::Tickets => decode_into(module, raw, &mut self.chamados)?,
            Module::Assets => decode_into(module, raw, &mut self.ativos)?,
            Module::Inventory => decode_into(module, raw, &mut self.inventario)?,
            Module::Bills => decode_into(module, raw, &mut self.contas_mensais)?,
        };
        self.rejected += rejected;
        Ok(())
    }

    /// Decode a combined document `{ "compras": [...], "chamados": [...], ... }`
    ///
    /// Missing modules are empty collections.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut modules) = document else {
            return Err(Error::validation("snapshot document must be a JSON object"));
        };

        let mut snapshot = Self::default();
        for module in Module::ALL {
            if let Some(raw) = modules.remove(module.key()) {
                snapshot.ingest(module, raw)?;
            }
        }
        Ok(snapshot)
    }

    /// Number of records of a module
    pub fn len(&self, module: Module) -> usize {
        match module {
            Module::Purchases => self.compras.len(),
            Module::Tickets => self.chamados.len(),
            Module::Assets => self.ativos.len(),
            Module::Inventory => self.inventario.len(),
            Module::Bills => self.contas_mensais.len(),
        }
    }

    /// Whether every collection is empty
    pub fn is_empty(&self) -> bool {
        Module::ALL.into_iter().all(|m| self.len(m) == 0)
    }
}

fn decode_into<T: DeserializeOwned>(module: Module, raw: Value, out: &mut Vec<T>) -> Result<usize> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            return Err(Error::validation(format!(
                "{} collection must be a JSON array, got {}",
                module.key(),
                kind_of(&other)
            )))
        }
    };

    let mut rejected = 0;
    out.reserve(items.len());

    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(module = module.key(), index, kind = kind_of(&item), "Skipping non-object record");
            rejected += 1;
            continue;
        }
        match serde_json::from_value::<T>(item) {
            Ok(record) => out.push(record),
            Err(e) => {
                warn!(module = module.key(), index, error = %e, "Skipping malformed record");
                rejected += 1;
            }
        }
    }

    debug!(module = module.key(), loaded = out.len(), rejected, "Decoded collection");
    Ok(rejected)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
