//! geecache - An in-memory LRU cache with a byte budget
//!
//! Evicts least recently used entries once keys plus values outgrow the
//! configured number of bytes, and reports every eviction to a callback.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use cache::{Cache, CacheStats, Value};
pub use config::Config;
pub use error::CacheError;
pub use session::Session;
