use crate::model::{Metrics, Signals};
use crate::report::escape::escape_markdown_v2;
use crate::report::tiers::Tier;
use crate::utils::display_name;

const VOLUME_SPIKE_PCT: f64 = 20.0;
const BLOCK_SEPARATOR: &str = "\n---\n";

/// Everything needed to render one instrument's block.
#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub metrics: Metrics,
    pub signals: Signals,
    pub commentary: Option<String>,
}

pub fn price_glyph(price_change: f64) -> &'static str {
    if price_change < 0.0 { "📉" } else { "📈" }
}

pub fn volume_glyph(volume_change: f64) -> &'static str {
    if volume_change > VOLUME_SPIKE_PCT {
        "🚀"
    } else if volume_change < -VOLUME_SPIKE_PCT {
        "📉"
    } else {
        "📊"
    }
}

/// Renders one instrument block, unescaped.
pub fn format_block(report: &InstrumentReport) -> String {
    let m = &report.metrics;
    let s = &report.signals;
    let mut block = format!(
        "*{}* ({})\n\
         💰 *Price*: ₹{:.2} {} (*{:.2}%*)\n\
         📈 *Volume*: {} {:.2}% vs avg\n\
         📊 *Technical Indicators*:\n```\n\
         Price vs 5-day MA: {:.2}%\n\
         Price vs 20-day MA: {:.2}%\n\
         RSI (14): {:.2} ({})\n\
         Volatility: {:.2}%\n\
         Trend: {}\n\
         Volume: {}\n```\n",
        display_name(&m.symbol),
        m.symbol,
        m.price,
        price_glyph(m.price_change),
        m.price_change,
        volume_glyph(m.volume_change),
        m.volume_change,
        m.price_vs_ma5,
        m.price_vs_ma20,
        m.rsi,
        s.rsi_zone,
        m.volatility,
        s.trend,
        s.volume,
    );
    if let Some(text) = &report.commentary {
        block.push_str("🤖 *AI Insights*:\n");
        block.push_str(text);
        block.push('\n');
    }
    block
}

/// Joins a batch's blocks under the tier header and escapes the result once.
pub fn compose_tier_message(tier: Tier, date_label: &str, blocks: &[String]) -> String {
    let raw = format!(
        "📊 *{}* - {}\n\n{}",
        tier.title(),
        date_label,
        blocks.join(BLOCK_SEPARATOR)
    );
    escape_markdown_v2(&raw)
}
