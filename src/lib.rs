//! Weekly emotional insights and a coarse wellbeing signal derived from a
//! user's journal.
//!
//! The derivations in [`services`] are pure functions over read-only
//! snapshots; [`services::refresh`] re-runs them periodically against a
//! [`sources::JournalSource`] and publishes the results.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::broadcast;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod sources;

use config::Config;
use services::refresh::Refresher;
use sources::PgJournalSource;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    pub refresher: Refresher<PgJournalSource>,
}
