//! Data models for itops

mod alert;
mod asset;
mod bill;
mod inventory;
pub mod lenient;
mod purchase;
mod snapshot;
mod summary;
mod taxonomy;
mod ticket;

pub use alert::*;
pub use asset::*;
pub use bill::*;
pub use inventory::*;
pub use purchase::*;
pub use snapshot::*;
pub use summary::*;
pub use taxonomy::{Taxonomy, Tone};
pub use ticket::*;
