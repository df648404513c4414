//! Keeps the wallet from ending any operation below zero.

use crate::portfolio::total_debt;
use sim_core::{Loan, PlayerState, SimConfig};
use tracing::debug;

/// How a shortfall was covered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coverage {
    pub from_savings: f64,
    pub borrowed: f64,
}

/// Cover a negative wallet from savings, then with overdraft debt.
///
/// Savings drawn count as lifestyle spending. Any remainder is added to the
/// open overdraft loan, or opens one at the configured default rate.
pub fn enforce(state: &mut PlayerState, cfg: &SimConfig) -> Coverage {
    if state.wallet.is_nan() {
        state.wallet = 0.0;
    }
    if state.wallet >= 0.0 {
        return Coverage::default();
    }
    let mut shortfall = -state.wallet;
    let from_savings = shortfall.min(state.savings.max(0.0));
    state.savings -= from_savings;
    state.stats.lifestyle_spent += from_savings;
    shortfall -= from_savings;
    state.wallet = 0.0;

    let mut borrowed = 0.0;
    if shortfall > 0.0 {
        match state.loans.iter().position(|l| l.overdraft) {
            Some(i) => state.loans[i].principal += shortfall,
            None => {
                let id = state.allocate_id();
                state.loans.push(Loan {
                    id,
                    principal: shortfall,
                    rate_annual: cfg.default_loan_rate,
                    overdraft: true,
                });
            }
        }
        state.flags.ever_had_debt = true;
        borrowed = shortfall;
    }
    state.debt = total_debt(state);
    debug!(from_savings, borrowed, "covered wallet shortfall");
    Coverage {
        from_savings,
        borrowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_wallet_is_untouched() {
        let mut s = PlayerState::with_balances(10.0, 5.0);
        assert_eq!(enforce(&mut s, &SimConfig::default()), Coverage::default());
        assert_eq!(s.wallet, 10.0);
        assert_eq!(s.savings, 5.0);
    }

    #[test]
    fn savings_cover_first() {
        let mut s = PlayerState::with_balances(0.0, 500.0);
        s.wallet = -200.0;
        let c = enforce(&mut s, &SimConfig::default());
        assert_eq!(c.from_savings, 200.0);
        assert_eq!(s.wallet, 0.0);
        assert_eq!(s.savings, 300.0);
        assert_eq!(s.stats.lifestyle_spent, 200.0);
        assert!(s.loans.is_empty());
        assert!(!s.flags.ever_had_debt);
    }

    #[test]
    fn remainder_becomes_one_overdraft_loan() {
        let cfg = SimConfig::default();
        let mut s = PlayerState::with_balances(0.0, 100.0);
        s.wallet = -400.0;
        enforce(&mut s, &cfg);
        assert_eq!(s.loans.len(), 1);
        assert_eq!(s.loans[0].principal, 300.0);
        assert_eq!(s.loans[0].rate_annual, cfg.default_loan_rate);
        s.wallet = -50.0;
        enforce(&mut s, &cfg);
        assert_eq!(s.loans.len(), 1);
        assert_eq!(s.debt, 350.0);
        assert!(s.flags.ever_had_debt);
        assert_eq!(s.savings, 0.0);
    }
}
