/// GameLake - Games Analytics Dashboard Core
///
/// Read-only analytics over a games dataset held in a remote data lake:
/// a typed in-memory table loaded once per process through a cached SQL
/// query, plus pure filtered views, summary aggregates, and the two sorted
/// projections the dashboard charts are drawn from.

pub mod date;
pub mod error;
pub mod record;
pub mod table;
pub mod view;

pub use date::ReleaseDate;
pub use error::{ErrorCode, LakeError};
pub use record::{GameRecord, WireResult, EXPECTED_COLUMNS};
pub use table::{records_to_csv, records_to_json, GameTable};
pub use view::{Aggregates, FilterCriteria, FilteredView};

// Remote query engine client and cached loader - only with the client feature
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod context;
#[cfg(feature = "client")]
pub use client::{HttpQueryClient, QueryEngine};
#[cfg(feature = "client")]
pub use config::LakeConfig;
#[cfg(feature = "client")]
pub use context::{DashboardContext, GAMES_QUERY};

// Dashboard API server - only when the server feature is enabled
#[cfg(feature = "server")]
pub mod messages;
#[cfg(feature = "server")]
pub mod server;
