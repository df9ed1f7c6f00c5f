use crate::model::IndexReturn;

/// Outcome of the index-level aggregate check.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketVerdict {
    /// Every obtained index return is strictly negative.
    Falling(Vec<IndexReturn>),
    /// At least one obtained return is zero or positive.
    Routine,
    /// No index return could be obtained.
    NoData,
}

/// Decides the verdict from the returns that were successfully obtained.
/// An empty input is `NoData`, never a falling market.
pub fn evaluate(returns: &[IndexReturn]) -> MarketVerdict {
    if returns.is_empty() {
        return MarketVerdict::NoData;
    }
    if returns.iter().all(|r| r.return_pct < 0.0) {
        MarketVerdict::Falling(returns.to_vec())
    } else {
        MarketVerdict::Routine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn returns(values: &[f64]) -> Vec<IndexReturn> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| IndexReturn {
                index: format!("IDX{i}"),
                return_pct: *v,
            })
            .collect()
    }

    #[test]
    fn all_negative_is_falling() {
        let input = returns(&[-1.2, -0.5, -3.0]);
        assert_eq!(evaluate(&input), MarketVerdict::Falling(input.clone()));
    }

    #[test]
    fn one_positive_is_routine() {
        assert_eq!(evaluate(&returns(&[-1.2, 0.3, -3.0])), MarketVerdict::Routine);
    }

    #[test]
    fn zero_return_is_not_negative() {
        assert_eq!(evaluate(&returns(&[-1.0, 0.0])), MarketVerdict::Routine);
    }

    #[test]
    fn nothing_obtained_is_no_data() {
        assert_eq!(evaluate(&[]), MarketVerdict::NoData);
    }
}
