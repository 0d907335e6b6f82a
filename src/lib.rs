pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{HttpSightFetcher, InMemorySightStore, JsonFileSightStore, LocalStorage};
pub use app::{ServiceOptions, SightService};
pub use config::SightsConfig;
pub use core::sync::{RefreshReport, SyncOrchestrator, ZoneOutcome};
pub use core::zones::ZoneCatalog;
pub use domain::model::{NewSight, Sight, SightId};
pub use utils::error::{Result, SightError};
