use crate::config::TierConfig;
use std::fmt;

/// Instruments per outbound message.
pub const BATCH_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Large,
    Mid,
    Small,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Large, Tier::Mid, Tier::Small];

    pub fn title(&self) -> &'static str {
        match self {
            Tier::Large => "Large Cap Stocks",
            Tier::Mid => "Mid Cap Stocks",
            Tier::Small => "Small Cap Stocks",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tier of a symbol by reference-list membership. Unlisted symbols are large cap.
pub fn tier_of(symbol: &str, tiers: &TierConfig) -> Tier {
    let listed = |list: &[String]| list.iter().any(|s| s == symbol);
    if listed(&tiers.large_cap) {
        Tier::Large
    } else if listed(&tiers.mid_cap) {
        Tier::Mid
    } else if listed(&tiers.small_cap) {
        Tier::Small
    } else {
        Tier::Large
    }
}

/// Splits the universe into tiers (large, mid, small), preserving input order.
/// Blank symbols are dropped.
pub fn partition(symbols: &[String], tiers: &TierConfig) -> Vec<(Tier, Vec<String>)> {
    let mut groups: Vec<(Tier, Vec<String>)> = Tier::ALL.iter().map(|t| (*t, Vec::new())).collect();
    for symbol in symbols.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let tier = tier_of(symbol, tiers);
        if let Some((_, members)) = groups.iter_mut().find(|(t, _)| *t == tier) {
            members.push(symbol.to_string());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unlisted_symbol_defaults_to_large_cap() {
        assert_eq!(tier_of("AAPL", &TierConfig::default()), Tier::Large);
    }

    #[test]
    fn default_lists_place_symbols() {
        let cfg = TierConfig::default();
        assert_eq!(tier_of("TCS.NS", &cfg), Tier::Large);
        assert_eq!(tier_of("TITAN.NS", &cfg), Tier::Mid);
        assert_eq!(tier_of("VBL.NS", &cfg), Tier::Small);
    }

    #[test]
    fn partition_keeps_order_and_drops_blanks() {
        let groups = partition(
            &symbols(&["VBL.NS", " TCS.NS ", "", "MARICO.NS", "AAPL", "FORTIS.NS"]),
            &TierConfig::default(),
        );
        assert_eq!(groups[0], (Tier::Large, symbols(&["TCS.NS", "AAPL"])));
        assert_eq!(groups[1], (Tier::Mid, symbols(&["MARICO.NS"])));
        assert_eq!(groups[2], (Tier::Small, symbols(&["VBL.NS", "FORTIS.NS"])));
    }

    #[test]
    fn thirteen_symbols_make_three_batches() {
        let list: Vec<String> = (1..=13).map(|i| format!("S{i:02}")).collect();
        let batches: Vec<&[String]> = list.chunks(BATCH_SIZE).collect();
        assert_eq!(batches.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![5, 5, 3]);
        assert_eq!(batches[2][0], "S11");
    }
}
