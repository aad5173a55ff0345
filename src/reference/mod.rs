//! Session reference ids of the form `project.user.timestamp`.
//!
//! The id correlates a dialog across requests. It is created lazily, persisted
//! in a [`ReferenceStore`], and reused until explicitly reset.

mod clock;
mod store;

pub use clock::{Clock, SystemClock};
pub use store::{FileStore, MemoryStore, ReferenceStore};

use crate::config::Settings;
use crate::error::{FormatError, ReferenceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A parsed reference id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceId {
    pub project_id: String,
    pub user_id: String,
    /// Unix time in seconds.
    pub timestamp: i64,
}

impl ReferenceId {
    pub fn new(project_id: impl Into<String>, user_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            project_id: project_id.into(),
            user_id: user_id.into(),
            timestamp,
        }
    }

    /// Parses `project.user.timestamp`. Exactly three segments are required and
    /// the last one must be a plain integer: ASCII digits with an optional
    /// leading `-`.
    pub fn parse(id: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = id.split('.').collect();
        let [project_id, user_id, timestamp] = parts.as_slice() else {
            return Err(FormatError::SegmentCount {
                id: id.to_string(),
                found: parts.len(),
            });
        };
        let digits = timestamp.strip_prefix('-').unwrap_or(*timestamp);
        let timestamp = digits
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| timestamp.parse::<i64>().ok())
            .flatten()
            .ok_or_else(|| FormatError::Timestamp {
                id: id.to_string(),
                timestamp: timestamp.to_string(),
            })?;
        Ok(Self::new(*project_id, *user_id, timestamp))
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.user_id, self.timestamp)
    }
}

impl FromStr for ReferenceId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Creates, persists and resets the session reference id.
pub struct ReferenceIdManager<S, C = SystemClock> {
    store: S,
    clock: C,
    project_id: String,
    user_id: String,
    key: String,
}

impl<S: ReferenceStore> ReferenceIdManager<S, SystemClock> {
    pub fn new(settings: &Settings, store: S) -> Self {
        Self::with_clock(settings, store, SystemClock)
    }
}

impl<S: ReferenceStore, C: Clock> ReferenceIdManager<S, C> {
    pub fn with_clock(settings: &Settings, store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            project_id: settings.project_id.clone(),
            user_id: settings.user_id.clone(),
            key: settings.reference_key(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Builds a fresh id from the configured project/user and the current time.
    /// Nothing is persisted.
    pub fn generate(&self) -> ReferenceId {
        let id = ReferenceId::new(&self.project_id, &self.user_id, self.clock.now_secs());
        debug!(reference_id = %id, "generated reference id");
        id
    }

    /// The `project.user` prefix, sent to the server when it should assign the timestamp.
    pub fn partial(&self) -> String {
        format!("{}.{}", self.project_id, self.user_id)
    }

    /// The persisted id, if any. A stored value of the wrong shape is a `FormatError`.
    pub fn current(&self) -> Result<Option<ReferenceId>, ReferenceError> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(ReferenceId::parse(&raw)?)),
            None => Ok(None),
        }
    }

    /// Returns the persisted id, creating and persisting one on first use.
    ///
    /// A stored value that no longer parses is replaced by a fresh id.
    pub fn get_or_create(&self) -> Result<ReferenceId, ReferenceError> {
        match self.current() {
            Ok(Some(id)) => Ok(id),
            Ok(None) => self.create(),
            Err(ReferenceError::Format(e)) => {
                warn!(error = %e, key = %self.key, "discarding malformed stored reference id");
                self.create()
            }
            Err(e) => Err(e),
        }
    }

    /// Discards any persisted id and starts a new session.
    pub fn reset(&self) -> Result<ReferenceId, ReferenceError> {
        self.store.clear(&self.key)?;
        info!(key = %self.key, "reference id reset");
        self.create()
    }

    /// Persists an id issued elsewhere (for example by the server) after validating it.
    pub fn adopt(&self, raw: &str) -> Result<ReferenceId, ReferenceError> {
        let id = ReferenceId::parse(raw)?;
        self.store.set(&self.key, &id.to_string())?;
        info!(reference_id = %id, "adopted reference id");
        Ok(id)
    }

    /// Removes the persisted id without creating a new one.
    pub fn clear(&self) -> Result<(), ReferenceError> {
        self.store.clear(&self.key)?;
        Ok(())
    }

    fn create(&self) -> Result<ReferenceId, ReferenceError> {
        let id = self.generate();
        self.store.set(&self.key, &id.to_string())?;
        info!(reference_id = %id, key = %self.key, "persisted new reference id");
        Ok(id)
    }
}
