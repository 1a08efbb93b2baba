//! # itops
//!
//! Dashboard status and alerting for an IT operations console.
//!
//! itops reads the console's five module collections (purchases, tickets,
//! assets, inventory and monthly bills), derives a secondary status for each
//! record and rolls everything up into per-module statistics and a
//! severity-ordered alert feed.
//!
//! ## Architecture
//!
//! - **Models**: typed records with lenient decoding of backend JSON
//! - **Alerting**: pure classification and aggregation over a snapshot
//! - **Gateway**: snapshot sources (JSON files or the REST backend)
//! - **API**: REST API serving statistics, alerts and annotated listings
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the dashboard API over the files in ./data
//! itops serve
//!
//! # Print today's alerts from the backend
//! itops --backend-url http://localhost:5000 alerts
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{AlertAggregator, build_alerts, build_summary};
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::gateway::SnapshotSource;
    pub use crate::models::*;
}
