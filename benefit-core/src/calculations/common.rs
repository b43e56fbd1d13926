//! Rounding and clamping helpers shared by the calculation steps.

use rust_decimal::{Decimal, RoundingStrategy};

/// Months per year, used to annualize monthly amounts and back again.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds to whole öre (two decimals), midpoint away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use benefit_core::calculations::common::round_ore;
///
/// assert_eq!(round_ore(dec!(20173.4208)), dec!(20173.42));
/// assert_eq!(round_ore(dec!(1174.535)), dec!(1174.54));
/// assert_eq!(round_ore(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_ore(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_ore_rounds_down_below_midpoint() {
        assert_eq!(round_ore(dec!(1174.5333)), dec!(1174.53));
    }

    #[test]
    fn round_ore_rounds_up_at_midpoint() {
        assert_eq!(round_ore(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_ore_rounds_negative_midpoint_away_from_zero() {
        assert_eq!(round_ore(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_ore_keeps_whole_amounts() {
        assert_eq!(round_ore(dec!(11544)), dec!(11544));
    }

    #[test]
    fn non_negative_floors_at_zero() {
        assert_eq!(non_negative(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(0)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(59456)), dec!(59456));
    }

    #[test]
    fn months_per_year_is_twelve() {
        assert_eq!(MONTHS_PER_YEAR, dec!(12));
    }
}
