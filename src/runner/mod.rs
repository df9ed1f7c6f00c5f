// Run orchestration for the two batch modes.

pub mod market_fall;
pub mod stock;

pub use market_fall::MarketFallRunner;
pub use stock::{StockRunSummary, StockRunner};
