use thiserror::Error;

/// Errors raised when a flat block list cannot be turned back into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Component id '{0}' is not a dot-separated path of non-negative integers")]
    MalformedId(String),

    #[error("Component id '{0}' appears more than once in the flat list")]
    DuplicateId(String),

    #[error("Block '{component_id}' refers to parent '{parent_id}', which is not in the flat list")]
    Orphan {
        component_id: String,
        parent_id: String,
    },
}

/// Errors that can occur while applying a raw backend response to a tree.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Backend response must be a JSON array, but found {0}")]
    NotAnArray(&'static str),

    #[error("Backend record at index {index} is not a valid block: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced when parsing a reference id of the form `project.user.timestamp`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Reference id '{id}' must have exactly 3 dot-separated parts, found {found}")]
    SegmentCount { id: String, found: usize },

    #[error("Reference id '{id}' has a non-integer timestamp '{timestamp}'")]
    Timestamp { id: String, timestamp: String },
}

/// Failures of the persistent key-value store backing the reference id.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file '{path}' is not valid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store lock was poisoned")]
    Poisoned,
}

/// Errors from the reference id manager.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors surfaced by a `BlockBackend` implementation.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while reading settings from the environment.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Environment variable '{name}' has invalid value '{value}': {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}
