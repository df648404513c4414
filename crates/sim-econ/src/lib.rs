#![deny(warnings)]

//! Economic models: drift, cash-flow and sentiment formulas for Windfall.
//!
//! This crate provides pure utilities for:
//! - Per-class asset drift (depreciation, appreciation net of inflation, returns)
//! - Interest on savings and loans, prorated upkeep and property tax
//! - Weekly business books including boards and dividends
//! - Event frequency and lifestyle sentiment
//! - Splitting a gross prize into taxes, savings and wallet ([`windfall`])

pub mod windfall;

pub use windfall::{plan_windfall, state_tax_rate, WindfallPlan, FEDERAL_TAX_RATE};

use serde::{Deserialize, Serialize};
use sim_core::{Business, EventConfig, Lifestyle};
use thiserror::Error;

/// Days per simulated year.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Days per simulated month.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Weeks per simulated year.
pub const WEEKS_PER_YEAR: f64 = 52.0;
/// Floor on a house's effective annual appreciation.
pub const HOUSE_RATE_FLOOR: f64 = -0.2;

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Monetary input must be finite.
    #[error("non-finite amount: {0}")]
    NonFinite(f64),
    /// Decimal conversion overflowed.
    #[error("amount out of decimal range")]
    OutOfRange,
}

/// Prorate a monthly amount over `days` using 30-day months.
///
/// Example:
/// assert_eq!(prorate_monthly(300.0, 15), 150.0);
pub fn prorate_monthly(monthly: f64, days: u32) -> f64 {
    (monthly / DAYS_PER_MONTH) * f64::from(days)
}

fn years(days: u32) -> f64 {
    f64::from(days) / DAYS_PER_YEAR
}

/// Car value after `days` of depreciation at an annual rate.
pub fn depreciate(value: f64, rate_annual: f64, days: u32) -> f64 {
    value * (1.0 - rate_annual).powf(years(days))
}

/// Value after compounding an annual rate over `days`.
pub fn compound(value: f64, rate_annual: f64, days: u32) -> f64 {
    value * (1.0 + rate_annual).powf(years(days))
}

/// House appreciation net of inflation (given in percent), floored at -20%/yr.
pub fn house_effective_rate(app_rate_annual: f64, inflation_pct: f64) -> f64 {
    (app_rate_annual - inflation_pct / 100.0).max(HOUSE_RATE_FLOOR)
}

/// Property tax owed on `value` over `days`.
pub fn property_tax(value: f64, rate_annual: f64, days: u32) -> f64 {
    value * rate_annual * years(days)
}

/// Simple daily savings interest for an APY in percent.
pub fn savings_interest(savings: f64, apy_pct: f64, days: u32) -> f64 {
    savings * (apy_pct / 100.0 / DAYS_PER_YEAR) * f64::from(days)
}

/// Interest owed on a loan over `days`; principal is not compounded.
///
/// Example:
/// // 10k at 8%/yr for a 30-day month ≈ 66.67
/// let i = loan_interest(10_000.0, 0.08, 30);
pub fn loan_interest(principal: f64, rate_annual: f64, days: u32) -> f64 {
    principal * (rate_annual / 12.0) * (f64::from(days) / DAYS_PER_MONTH)
}

/// Weekly payroll for a headcount on annual salaries.
pub fn weekly_payroll(employees: u32, salary_annual: f64) -> f64 {
    f64::from(employees) * salary_annual / WEEKS_PER_YEAR
}

/// Itemized result of one business week.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBooks {
    pub gross_profit: f64,
    pub payroll: f64,
    pub fixed_costs: f64,
    pub board_comp: f64,
    pub vacancy_overhead: f64,
    pub dividends: f64,
    pub net: f64,
}

/// Close one week of books for `business`.
pub fn weekly_books(business: &Business, share_price: f64, vacancy_overhead: f64) -> WeeklyBooks {
    let gross_profit = business.weekly_revenue * business.gross_margin;
    let payroll = weekly_payroll(business.employees, business.salary_per_employee_annual);
    let fixed_costs = business.fixed_weekly_costs;
    let (board_comp, vacancy) = if business.has_board() {
        let comp = business
            .board
            .iter()
            .map(|d| d.annual_comp / WEEKS_PER_YEAR)
            .sum::<f64>();
        (comp, f64::from(business.vacant_seats()) * vacancy_overhead)
    } else {
        (0.0, 0.0)
    };
    let dividends = if business.ipo && business.shares > 0 {
        business.shares as f64 * share_price * business.dividend_yield / WEEKS_PER_YEAR
    } else {
        0.0
    };
    let net = gross_profit - payroll - fixed_costs - board_comp - vacancy + dividends;
    WeeklyBooks {
        gross_profit,
        payroll,
        fixed_costs,
        board_comp,
        vacancy_overhead: vacancy,
        dividends,
        net,
    }
}

/// Weekly revenue multiplier; filled board seats accelerate growth.
pub fn organic_growth_factor(base: f64, per_director: f64, filled_seats: usize) -> f64 {
    1.0 + base + per_director * filled_seats as f64
}

/// Shares issued at IPO, proportional to weekly revenue.
pub fn ipo_shares(weekly_revenue: f64, revenue_per_share: f64) -> u64 {
    if revenue_per_share <= 0.0 || !weekly_revenue.is_finite() || weekly_revenue <= 0.0 {
        return 0;
    }
    (weekly_revenue / revenue_per_share).round() as u64
}

/// Sentiment scalar: discretionary spend raises it, security spend calms it.
pub fn event_boost(lifestyle: &Lifestyle) -> f64 {
    let discretionary = lifestyle.burn + lifestyle.travel + lifestyle.staff;
    (discretionary / 100_000.0 - lifestyle.security / 200_000.0).clamp(-1.0, 3.0)
}

/// Per-day probability that a random event fires.
pub fn event_probability(boost: f64, cfg: &EventConfig) -> f64 {
    (cfg.base_probability + boost * cfg.boost_weight).clamp(cfg.min_probability, cfg.max_probability)
}

/// Happiness change for `days` of lifestyle spend under a debt burden.
pub fn lifestyle_happiness(monthly_total: f64, debt: f64, days: u32) -> f64 {
    let lift = (monthly_total / 10_000.0).min(5.0);
    let drag = (debt / 50_000.0).min(5.0);
    (lift - drag) * f64::from(days) / DAYS_PER_MONTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::{Director, EntityId, GrowthStage};

    fn shop() -> Business {
        Business {
            id: EntityId(1),
            name: "Shop".into(),
            employees: 10,
            salary_per_employee_annual: 52_000.0,
            weekly_revenue: 40_000.0,
            gross_margin: 0.5,
            fixed_weekly_costs: 3_000.0,
            stage: GrowthStage::Growth,
            ipo: false,
            shares: 0,
            dividend_yield: 0.0,
            board_seats: 0,
            board: vec![],
            ceo: None,
        }
    }

    #[test]
    fn car_loses_its_rate_over_a_year() {
        let v = depreciate(40_000.0, 0.10, 365);
        assert!((v - 36_000.0).abs() < 1e-6);
    }

    #[test]
    fn house_rate_is_floored() {
        assert!((house_effective_rate(0.04, 2.5) - 0.015).abs() < 1e-12);
        assert_eq!(house_effective_rate(-0.5, 10.0), HOUSE_RATE_FLOOR);
    }

    #[test]
    fn loan_interest_matches_monthly_rate() {
        let i = loan_interest(10_000.0, 0.08, 30);
        assert!((i - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn savings_interest_is_linear_in_days() {
        let one = savings_interest(100_000.0, 4.5, 1);
        let ten = savings_interest(100_000.0, 4.5, 10);
        assert!((ten - one * 10.0).abs() < 1e-9);
    }

    #[test]
    fn weekly_books_without_board() {
        let b = shop();
        let books = weekly_books(&b, 10.0, 250.0);
        assert_eq!(books.payroll, 10_000.0);
        assert_eq!(books.gross_profit, 20_000.0);
        assert_eq!(books.net, 7_000.0);
        assert_eq!(books.vacancy_overhead, 0.0);
    }

    #[test]
    fn weekly_books_with_board_and_dividends() {
        let mut b = shop();
        b.board_seats = 3;
        b.board.push(Director {
            name: "Grace".into(),
            annual_comp: 52_000.0,
        });
        b.ipo = true;
        b.shares = 5_200;
        b.dividend_yield = 0.02;
        let books = weekly_books(&b, 10.0, 250.0);
        assert_eq!(books.board_comp, 1_000.0);
        assert_eq!(books.vacancy_overhead, 500.0);
        assert!((books.dividends - 20.0).abs() < 1e-9);
        assert!((books.net - (7_000.0 - 1_000.0 - 500.0 + 20.0)).abs() < 1e-9);
    }

    #[test]
    fn ipo_share_count() {
        assert_eq!(ipo_shares(250_000.0, 80.0), 3_125);
        assert_eq!(ipo_shares(-5.0, 80.0), 0);
    }

    #[test]
    fn event_probability_is_clamped() {
        let cfg = EventConfig::default();
        assert!((event_probability(0.0, &cfg) - 0.08).abs() < 1e-12);
        assert_eq!(event_probability(10.0, &cfg), 0.35);
        assert_eq!(event_probability(-10.0, &cfg), 0.02);
    }

    #[test]
    fn debt_drags_happiness() {
        assert!(lifestyle_happiness(20_000.0, 0.0, 30) > 0.0);
        assert!(lifestyle_happiness(0.0, 200_000.0, 30) < 0.0);
    }

    proptest! {
        #[test]
        fn depreciation_never_increases(value in 0.0f64..1.0e7, rate in 0.0f64..0.99, days in 0u32..3650) {
            prop_assert!(depreciate(value, rate, days) <= value + 1e-9);
        }

        #[test]
        fn growth_factor_rises_with_board(filled in 0usize..8) {
            let f0 = organic_growth_factor(0.002, 0.0005, filled);
            let f1 = organic_growth_factor(0.002, 0.0005, filled + 1);
            prop_assert!(f1 > f0);
        }

        #[test]
        fn boost_stays_in_band(burn in 0.0f64..1.0e7, sec in 0.0f64..1.0e7) {
            let l = Lifestyle { burn, security: sec, travel: 0.0, staff: 0.0 };
            let b = event_boost(&l);
            prop_assert!((-1.0..=3.0).contains(&b));
        }
    }
}
