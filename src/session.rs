//! Command Session
//!
//! Executes driver commands against a single `Cache<String>`.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    AddResponse, Command, ErrorResponse, EvictResponse, GetResponse, LenResponse, RemoveResponse,
    Reply, StatsResponse,
};

/// Keys handed to the eviction callback since the last drain
type EvictionLog = Arc<Mutex<Vec<String>>>;

// == Session ==
/// Owns a cache and answers commands one at a time.
///
/// The eviction callback records evicted keys so each reply can report
/// exactly what its command pushed out.
#[derive(Debug)]
pub struct Session {
    cache: Cache<String>,
    evicted: EvictionLog,
}

impl Session {
    /// Creates a session over a cache with the given byte budget.
    pub fn new(max_bytes: usize) -> Self {
        let evicted: EvictionLog = Arc::default();
        let sink = Arc::clone(&evicted);
        let cache = Cache::with_eviction_callback(max_bytes, move |key, _value: String| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(key);
        });
        Self { cache, evicted }
    }

    /// Creates a session from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_bytes)
    }

    pub fn cache(&self) -> &Cache<String> {
        &self.cache
    }

    // == Execute ==
    /// Runs one command and builds its reply.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, "executing command");

        let reply = match command {
            Command::Add { key, value } => {
                self.cache.add(key.clone(), value);
                Reply::Add(AddResponse {
                    key,
                    evicted: self.take_evicted(),
                })
            }
            Command::Get { key } => {
                let value = self
                    .cache
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| CacheError::NotFound(key.clone()))?;
                Reply::Get(GetResponse::new(key, value))
            }
            Command::Peek { key } => {
                let value = self
                    .cache
                    .peek(&key)
                    .cloned()
                    .ok_or_else(|| CacheError::NotFound(key.clone()))?;
                Reply::Get(GetResponse::new(key, value))
            }
            Command::Remove { key } => {
                let removed = self.cache.remove(&key).is_some();
                Reply::Remove(RemoveResponse { key, removed })
            }
            Command::RemoveOldest => {
                self.cache.remove_oldest();
                Reply::Evict(EvictResponse {
                    evicted: self.take_evicted(),
                })
            }
            Command::Len => Reply::Len(LenResponse {
                len: self.cache.len(),
            }),
            Command::Stats => Reply::Stats(StatsResponse::from(self.cache.stats())),
        };

        Ok(reply)
    }

    // == Handle Line ==
    /// Parses and runs one input line.
    ///
    /// Blank lines and `#` comments yield None.
    pub fn handle_line(&mut self, line: &str) -> Option<Result<Reply>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(Command::parse(line).and_then(|command| self.execute(command)))
    }

    /// Runs one input line and renders the reply, or the error, as JSON.
    pub fn respond(&mut self, line: &str) -> serde_json::Result<Option<String>> {
        let rendered = match self.handle_line(line) {
            None => return Ok(None),
            Some(Ok(reply)) => serde_json::to_string(&reply)?,
            Some(Err(err)) => {
                warn!(%err, line, "command failed");
                serde_json::to_string(&ErrorResponse::new(err.to_string()))?
            }
        };
        Ok(Some(rendered))
    }

    fn take_evicted(&self) -> Vec<String> {
        std::mem::take(&mut *self.evicted.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
