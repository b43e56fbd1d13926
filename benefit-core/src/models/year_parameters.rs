use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multiple of the price base amount capping the price of a standard car.
const STANDARD_CAR_PRICE_MULTIPLE: Decimal = Decimal::from_parts(75, 0, 0, false, 1);

/// Multiple of the price base amount capping the price of an electric or
/// plug-in hybrid car.
const ELECTRIC_CAR_PRICE_MULTIPLE: Decimal = Decimal::TEN;

/// Tax and policy constants for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearParameters {
    pub tax_year: i32,
    /// Price base amount (prisbasbelopp).
    pub price_base_amount: Decimal,
    /// Annual income above which state income tax applies (skiktgräns).
    pub state_tax_threshold: Decimal,
    pub state_tax_rate: Decimal,
    /// Monthly ceiling of pension-qualifying income.
    pub pension_monthly_cap: Decimal,
    pub default_deduction_rate: Decimal,
}

impl YearParameters {
    pub fn max_car_price_standard(&self) -> Decimal {
        STANDARD_CAR_PRICE_MULTIPLE.saturating_mul(self.price_base_amount)
    }

    pub fn max_car_price_electric(&self) -> Decimal {
        ELECTRIC_CAR_PRICE_MULTIPLE.saturating_mul(self.price_base_amount)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn params() -> YearParameters {
        YearParameters {
            tax_year: 2026,
            price_base_amount: dec!(59200),
            state_tax_threshold: dec!(643000),
            state_tax_rate: dec!(0.20),
            pension_monthly_cap: dec!(52125),
            default_deduction_rate: dec!(0.0195),
        }
    }

    #[test]
    fn standard_multiple_is_seven_and_a_half() {
        assert_eq!(STANDARD_CAR_PRICE_MULTIPLE, dec!(7.5));
    }

    #[test]
    fn max_car_price_standard_is_seven_and_a_half_base_amounts() {
        assert_eq!(params().max_car_price_standard(), dec!(444000));
    }

    #[test]
    fn max_car_price_electric_is_ten_base_amounts() {
        assert_eq!(params().max_car_price_electric(), dec!(592000));
    }
}
