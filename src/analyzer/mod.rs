// Analyzer module: indicator engine, signal classification and the market-fall decision.

pub mod price_analysis;
pub mod market_indicators;
pub mod market_fall;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
