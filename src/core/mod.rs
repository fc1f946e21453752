pub mod engine;
pub mod services;

pub use engine::{LoadReport, LoadSource, SyncEngine};
