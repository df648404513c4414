//! Splitting a gross prize into withholding, savings and spendable cash.

use crate::EconError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sim_core::PayoutKind;
use tracing::debug;

/// Average federal withholding on prize money (24%).
pub const FEDERAL_TAX_RATE: Decimal = Decimal::from_parts(24, 0, 0, false, 2);

const ANNUITY_YEARS: i32 = 30;
const ANNUITY_RATE: f64 = 0.04;
/// Share of the annuity total left after per-payment taxes.
const ANNUITY_RETAINED: f64 = 0.55;
/// Share of the net prize parked in savings at the start.
const SAVINGS_SHARE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// State income tax on prize money; unknown codes pay nothing.
pub fn state_tax_rate(code: &str) -> Decimal {
    let (num, scale) = match code.trim().to_ascii_uppercase().as_str() {
        "MI" => (425, 4),
        "CA" => (133, 3),
        "NY" => (109, 3),
        "IL" => (495, 4),
        "PA" => (307, 4),
        "OH" => (4, 2),
        "NJ" => (1075, 4),
        "GA" => (575, 4),
        _ => (0, 0),
    };
    Decimal::new(num, scale)
}

/// Where the prize money goes on day one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindfallPlan {
    /// Taxable amount after the payout choice.
    pub gross: Decimal,
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub net: Decimal,
    pub savings: Decimal,
    pub wallet: Decimal,
}

impl WindfallPlan {
    pub fn taxes(&self) -> Decimal {
        self.federal_tax + self.state_tax
    }
}

fn cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn annuity_total(amount: f64) -> f64 {
    if amount == 0.0 {
        return 0.0;
    }
    let payment = amount * ANNUITY_RATE / (1.0 - (1.0 + ANNUITY_RATE).powi(-ANNUITY_YEARS));
    payment * f64::from(ANNUITY_YEARS) * ANNUITY_RETAINED
}

/// Compute the starting split for a prize of `amount` claimed in `state_code`.
///
/// Negative amounts are treated as zero; non-finite amounts are rejected.
pub fn plan_windfall(
    amount: f64,
    state_code: &str,
    payout: PayoutKind,
) -> Result<WindfallPlan, EconError> {
    if !amount.is_finite() {
        return Err(EconError::NonFinite(amount));
    }
    let amount = amount.max(0.0);
    let taxable = match payout {
        PayoutKind::Lump => amount,
        PayoutKind::Annuity => annuity_total(amount),
    };
    let gross = cents(Decimal::from_f64(taxable).ok_or(EconError::OutOfRange)?);
    let federal_tax = cents(gross * FEDERAL_TAX_RATE);
    let state_tax = cents(gross * state_tax_rate(state_code));
    let net = (gross - federal_tax - state_tax).max(Decimal::ZERO);
    let savings = cents(net * SAVINGS_SHARE);
    let wallet = net - savings;
    debug!(%gross, %net, state = state_code, "planned windfall");
    Ok(WindfallPlan {
        gross,
        federal_tax,
        state_tax,
        net,
        savings,
        wallet,
    })
}
