//! Currency rounding and input sanitizing.
//!
//! Simulation math runs on `f64`; amounts crossing the system edge
//! (snapshots for the leaderboard, windfall splits) are rounded to cents
//! through `rust_decimal`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to whole cents. Non-finite input maps to zero.
pub fn to_cents(amount: f64) -> Decimal {
    Decimal::from_f64(amount)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a decimal back to simulation precision.
pub fn from_decimal(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Round to cents and back.
pub fn round_cents(amount: f64) -> f64 {
    from_decimal(to_cents(amount))
}

/// Coerce user-supplied amounts: non-finite or negative becomes zero.
pub fn sanitize_amount(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(to_cents(1.005_000_1), Decimal::new(101, 2));
        assert_eq!(to_cents(-2.499), Decimal::new(-250, 2));
        assert_eq!(to_cents(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn sanitize_rejects_garbage() {
        assert_eq!(sanitize_amount(-5.0), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(12.5), 12.5);
    }

    #[test]
    fn round_cents_is_stable() {
        assert_eq!(round_cents(66.666_666), 66.67);
    }
}
