use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AgeGroup;

/// Already-parsed input for one salary exchange calculation.
///
/// Amounts are monthly kronor; rates are fractions (`0.0195` for 1.95 %).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross monthly salary before the exchange. Must be positive.
    pub gross_monthly_salary: Decimal,

    /// Car price including VAT. Must be positive.
    pub car_price: Decimal,

    /// Taxable monthly value of the car benefit. Must not be negative.
    pub benefit_value_monthly: Decimal,

    /// Share of the car price deducted from gross salary each month.
    /// Must lie in `(0, 0.10]`.
    pub deduction_rate: Decimal,

    /// Municipality used to look up the combined municipal and regional rate.
    pub municipality: String,

    /// Explicit rate entered by the user. Takes precedence over the
    /// municipality lookup whenever present.
    pub manual_tax_rate: Option<Decimal>,

    pub age_group: AgeGroup,
}
