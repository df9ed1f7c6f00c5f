use crate::analyzer::market_fall::MarketVerdict;
use crate::utils::DateWindow;

pub const ROUTINE_MESSAGE: &str = "Mutual Funds : Not a big gap";

/// Plain-text notification for a market-fall verdict.
pub fn market_fall_message(verdict: &MarketVerdict, window: &DateWindow) -> String {
    match verdict {
        MarketVerdict::Falling(returns) => {
            let lines: Vec<String> = returns
                .iter()
                .map(|r| format!("{}: {:.6}", r.index, r.return_pct))
                .collect();
            format!(
                "Indices are negative, from: {} to: {}\n{}",
                window.start_label(),
                window.end_label(),
                lines.join("\n")
            )
        }
        MarketVerdict::Routine => ROUTINE_MESSAGE.to_string(),
        MarketVerdict::NoData => format!(
            "Market fall check: no index returns available for {} to {}",
            window.start_label(),
            window.end_label()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndexReturn;
    use chrono::NaiveDate;

    fn window() -> DateWindow {
        DateWindow::trailing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(), 7)
    }

    #[test]
    fn falling_message_lists_every_index() {
        let verdict = MarketVerdict::Falling(vec![
            IndexReturn { index: "Nifty 50".into(), return_pct: -1.2 },
            IndexReturn { index: "NIFTY100 LOWVOL30".into(), return_pct: -0.5 },
        ]);
        assert_eq!(
            market_fall_message(&verdict, &window()),
            "Indices are negative, from: 01-Jan-2025 to: 08-Jan-2025\n\
             Nifty 50: -1.200000\n\
             NIFTY100 LOWVOL30: -0.500000"
        );
    }

    #[test]
    fn routine_and_no_data_messages() {
        assert_eq!(market_fall_message(&MarketVerdict::Routine, &window()), ROUTINE_MESSAGE);
        assert!(market_fall_message(&MarketVerdict::NoData, &window()).contains("no index returns"));
    }
}
