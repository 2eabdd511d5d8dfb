use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Settings;
use crate::services::filter::{PhraseFilter, Severity};

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Global tiers plus per-channel banned phrase lists
    pub filter: PhraseFilter,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings, filter: PhraseFilter) -> Self {
        Self {
            pool,
            settings,
            filter,
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("hard_phrases", &self.filter.tier(Severity::Hard).len())
            .field("soft_phrases", &self.filter.tier(Severity::Soft).len())
            .field("scoped", self.filter.scoped())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
