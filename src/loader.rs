use crate::backend::BlockBackend;
use crate::block::{FlatBlock, TreeBlock};
use crate::convert::tree_to_flat;
use crate::merge::{apply_backend_data, apply_backend_json};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a page load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadResult {
    pub blocks: Vec<TreeBlock>,
    /// Set when `blocks` were filled from the fallback records rather than the backend.
    pub is_mock_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fills a block configuration from a backend, degrading to canned data on failure.
pub struct PageLoader<B> {
    backend: B,
    fallback: Vec<FlatBlock>,
}

impl<B: BlockBackend> PageLoader<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            fallback: Vec::new(),
        }
    }

    /// Records merged into the tree when the backend cannot be used.
    pub fn with_fallback(mut self, fallback: Vec<FlatBlock>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Flattens `tree`, exchanges it with the backend and merges the answer.
    ///
    /// Never fails. A backend error or a malformed response yields the tree with
    /// the fallback records applied, `is_mock_data` set and the error text kept.
    pub fn load(&self, tree: &[TreeBlock]) -> LoadResult {
        let request = tree_to_flat(tree);

        let outcome = self
            .backend
            .exchange(&request)
            .map_err(|e| e.to_string())
            .and_then(|response| apply_backend_json(tree, &response).map_err(|e| e.to_string()));

        match outcome {
            Ok(blocks) => {
                info!(blocks = request.len(), "filled block configuration from backend");
                LoadResult {
                    blocks,
                    is_mock_data: false,
                    error: None,
                }
            }
            Err(error) => {
                warn!(%error, "backend unavailable, using fallback data");
                LoadResult {
                    blocks: apply_backend_data(tree, &self.fallback),
                    is_mock_data: true,
                    error: Some(error),
                }
            }
        }
    }
}
