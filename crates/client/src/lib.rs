//! `storefront-client`
//!
//! **Responsibility:** the stateful edge around the pure catalog core.
//!
//! This crate provides:
//! - Environment-driven configuration
//! - Local key/value persistence (SQLite) with shape validation on read
//! - Debounce/throttle timers for bursty input
//! - A last-write-wins product loader

pub mod config;
pub mod debounce;
pub mod loader;
pub mod persisted;
pub mod storage;

pub use config::{ClientConfig, RunOverrides};
pub use debounce::{CancellableTimer, Debouncer, Throttle};
pub use loader::{LoadError, LoadOutcome, LoadState, ProductLoader, ProductSource, StaticSource};
pub use persisted::{FILTERS_KEY, TASKS_KEY, Validate, decode, load_or_default, save};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
