//! Portfolio valuation. Always derived from live entity state, never cached.

use sim_core::PlayerState;

/// Current value per asset class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Breakdown {
    pub cars: f64,
    pub houses: f64,
    pub items: f64,
    /// Shares of public businesses at the nominal share price.
    pub business_equity: f64,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.cars + self.houses + self.items + self.business_equity
    }
}

pub fn breakdown(state: &PlayerState, share_price: f64) -> Breakdown {
    Breakdown {
        cars: state.cars.iter().map(|c| c.value).sum(),
        houses: state.houses.iter().map(|h| h.value).sum(),
        items: state.items.iter().map(|i| i.value).sum(),
        business_equity: state
            .businesses
            .iter()
            .filter(|b| b.ipo)
            .map(|b| b.shares as f64 * share_price)
            .sum(),
    }
}

pub fn total_assets(state: &PlayerState, share_price: f64) -> f64 {
    breakdown(state, share_price).total()
}

pub fn total_debt(state: &PlayerState) -> f64 {
    state.loans.iter().map(|l| l.principal).sum()
}

/// Re-derive debt, net worth and the high-water mark from current state.
pub fn recompute_totals(state: &mut PlayerState, share_price: f64) -> f64 {
    state.debt = total_debt(state);
    state.net_worth = state.wallet + state.savings + total_assets(state, share_price) - state.debt;
    if state.net_worth > state.high_net {
        state.high_net = state.net_worth;
    }
    state.net_worth
}
