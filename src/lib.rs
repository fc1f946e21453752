#![doc(test(attr(deny(warnings))))]

//! Expense Core provides the classification, migration, and
//! synchronization primitives behind a local-first expense tracker:
//! a keyword classifier, a schema-migration layer for persisted
//! snapshots, a cache/remote sync engine, and pure derived views.

pub mod classifier;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod migration;
pub mod storage;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
