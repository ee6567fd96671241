//! Process-lifetime dashboard context.
//!
//! Owns the query engine handle and the cached table, replacing any notion
//! of implicit global state: the context is constructed at startup, handed
//! to whoever needs data, and dropped at shutdown. A fresh process starts
//! with an empty cache and re-executes the query.

use crate::client::{HttpQueryClient, QueryEngine};
use crate::config::LakeConfig;
use crate::error::LakeError;
use crate::table::GameTable;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// The one fixed statement this dashboard runs against the lake.
pub const GAMES_QUERY: &str = r#"SELECT name, rating, metacritic, released, playtime
FROM "db_videojuegos_gold"."capa_gold_proyecto1""#;

/// Explicitly constructed context holding the engine handle and the cached
/// dataset.
pub struct DashboardContext {
    engine: Option<Box<dyn QueryEngine>>,
    cache: OnceCell<Arc<GameTable>>,
}

impl DashboardContext {
    /// Connect to the query engine described by `config`. The HTTP handle is
    /// built once here; no network traffic happens until the first load.
    pub fn connect(config: &LakeConfig) -> Result<Self, LakeError> {
        let client = HttpQueryClient::new(config)?;
        Ok(Self::with_engine(Box::new(client)))
    }

    /// Build a context around an arbitrary engine implementation.
    pub fn with_engine(engine: Box<dyn QueryEngine>) -> Self {
        DashboardContext {
            engine: Some(engine),
            cache: OnceCell::new(),
        }
    }

    /// Build a context around an already-materialized table. No engine is
    /// attached; loads always return the given table.
    pub fn with_table(table: GameTable) -> Self {
        DashboardContext {
            engine: None,
            cache: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    /// Load the games dataset, executing the fixed query on first call and
    /// returning the cached table afterwards. A failed load is not cached:
    /// the next call executes the query again.
    ///
    /// Concurrent first calls are collapsed into a single query execution.
    pub async fn load_games(&self) -> Result<Arc<GameTable>, LakeError> {
        self.cache
            .get_or_try_init(|| async {
                let engine = self.engine.as_ref().ok_or_else(|| {
                    LakeError::query("no query engine attached to this context")
                })?;

                info!("executing gold-layer games query");
                let wire = engine.execute(GAMES_QUERY).await?;
                let (table, skipped) = GameTable::from_wire(&wire)?;
                if skipped > 0 {
                    warn!("dropped {} rows that failed to decode", skipped);
                }
                info!("loaded {} games", table.len());
                Ok(Arc::new(table))
            })
            .await
            .map(Arc::clone)
    }

    /// The cached table, if a load has already succeeded.
    pub fn cached(&self) -> Option<Arc<GameTable>> {
        self.cache.get().cloned()
    }
}
