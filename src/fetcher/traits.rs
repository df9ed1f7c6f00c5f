use crate::model::{FetchError, PriceHistory};
use crate::utils::DateWindow;

/// Source of a current quote plus trailing daily history for a symbol.
#[async_trait::async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<PriceHistory, FetchError>;
}

/// Source of a single percent return for an index over a date window.
#[async_trait::async_trait]
pub trait IndexReturnProvider: Send + Sync {
    async fn fetch_return(&self, index: &str, window: &DateWindow) -> Result<f64, FetchError>;
}
