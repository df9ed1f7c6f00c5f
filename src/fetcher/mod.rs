pub mod traits;
pub mod retry;
pub mod yahoo;
pub mod nifty;

pub use traits::{IndexReturnProvider, PriceHistoryProvider};
pub use retry::RetryPolicy;
pub use yahoo::YahooChartClient;
pub use nifty::NiftyIndexClient;
