//! Per-class valuation drift and carrying costs, applied during time advance.

use crate::ledger::RecordOptions;
use crate::session::Session;
use sim_econ::{compound, depreciate, house_effective_rate, prorate_monthly, property_tax};
use tracing::trace;

impl Session {
    pub(crate) fn drift_assets(&mut self, days: u32) {
        self.drift_cars(days);
        self.drift_houses(days);
        self.drift_items(days);
    }

    fn drift_cars(&mut self, days: u32) {
        let mut wallet = 0.0;
        let mut assets = 0.0;
        for car in &mut self.state.cars {
            let next = depreciate(car.value, car.dep_rate_annual, days);
            assets += next - car.value;
            wallet -= prorate_monthly(car.maint_monthly, days);
            trace!(id = %car.id, from = car.value, to = next, "car drift");
            car.value = next;
        }
        self.log_drift(format!("Cars: depreciation & maintenance ({days}d)"), wallet, assets);
    }

    fn drift_houses(&mut self, days: u32) {
        let inflation = self.state.inflation;
        let mut wallet = 0.0;
        let mut assets = 0.0;
        let mut taxes = 0.0;
        for house in &mut self.state.houses {
            let rate = house_effective_rate(house.app_rate_annual, inflation);
            let next = compound(house.value, rate, days);
            let tax = property_tax(next, house.prop_tax_rate_annual, days);
            let rent = if house.rented {
                prorate_monthly(house.rent_monthly, days)
            } else {
                0.0
            };
            assets += next - house.value;
            wallet += rent - tax - prorate_monthly(house.upkeep_monthly, days);
            taxes += tax;
            trace!(id = %house.id, from = house.value, to = next, rate, "house drift");
            house.value = next;
        }
        self.state.stats.taxes_paid += taxes;
        self.log_drift(format!("Houses: market, tax, upkeep, rent ({days}d)"), wallet, assets);
    }

    fn drift_items(&mut self, days: u32) {
        let blocks = days / 30;
        let mut wallet = 0.0;
        let mut assets = 0.0;
        let rng = &mut self.rng;
        for item in &mut self.state.items {
            let mut next = compound(item.value, item.rate_annual, days);
            if item.volatility_monthly != 0.0 {
                let v = item.volatility_monthly.abs();
                for _ in 0..blocks {
                    next *= 1.0 + rng.range(-v, v);
                }
            }
            let next = next.max(0.0);
            assets += next - item.value;
            wallet -= prorate_monthly(item.upkeep_monthly, days);
            trace!(id = %item.id, from = item.value, to = next, "item drift");
            item.value = next;
        }
        self.log_drift(format!("Items: revaluation & upkeep ({days}d)"), wallet, assets);
    }

    fn log_drift(&mut self, title: String, wallet: f64, assets: f64) {
        if wallet == 0.0 && assets == 0.0 {
            return;
        }
        self.record(title, wallet, assets, RecordOptions::default());
    }
}
