use crate::block::FlatBlock;
use crate::error::BackendError;
use serde_json::Value;

/// The transport seam: posts a flat block list and returns the raw JSON answer.
///
/// Implementations own authentication, proxying and timeouts. The raw `Value`
/// is returned so callers can detect a response that is not an array.
pub trait BlockBackend: Send + Sync {
    fn exchange(&self, request: &[FlatBlock]) -> Result<Value, BackendError>;
}

impl<F> BlockBackend for F
where
    F: Fn(&[FlatBlock]) -> Result<Value, BackendError> + Send + Sync,
{
    fn exchange(&self, request: &[FlatBlock]) -> Result<Value, BackendError> {
        self(request)
    }
}

/// A backend that always answers with the same canned response.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    response: Value,
}

impl StaticBackend {
    pub fn new(response: Value) -> Self {
        Self { response }
    }

    /// Answers with the given flat records.
    pub fn from_blocks(blocks: &[FlatBlock]) -> Result<Self, BackendError> {
        serde_json::to_value(blocks)
            .map(Self::new)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl BlockBackend for StaticBackend {
    fn exchange(&self, _request: &[FlatBlock]) -> Result<Value, BackendError> {
        Ok(self.response.clone())
    }
}
