// Report composition: per-instrument blocks, tier batching, MarkdownV2 escaping.

pub mod composer;
pub mod escape;
pub mod market;
pub mod tiers;

pub use composer::{compose_tier_message, format_block, InstrumentReport};
pub use market::market_fall_message;
pub use tiers::{partition, Tier, BATCH_SIZE};
