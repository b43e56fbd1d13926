use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the municipal tax rate of a calculation came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRateSource {
    /// Looked up in the municipal rate table.
    Municipality(String),
    /// Entered manually; overrides any table entry.
    Manual,
}

/// Monthly and annual breakdown of a salary exchange.
///
/// All amounts are kronor rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub tax_year: i32,

    /// Gross salary given up each month (car price × deduction rate).
    pub gross_deduction_monthly: Decimal,

    /// Salary after the deduction plus the benefit value, floored at zero.
    pub taxable_income_monthly: Decimal,

    pub applied_tax_rate: Decimal,
    pub tax_rate_source: TaxRateSource,
    pub municipal_tax_monthly: Decimal,

    /// Monthly taxable income × 12. Overstates the state tax base since the
    /// basic deduction is not subtracted.
    pub taxable_income_annual_approx: Decimal,
    pub state_tax_annual: Decimal,
    pub state_tax_monthly: Decimal,

    pub total_tax_monthly: Decimal,

    /// Gross salary minus total tax. The exchange is already reflected in
    /// the lower tax, so the deduction is not subtracted again here.
    pub net_pay_monthly: Decimal,
    pub net_pay_annual: Decimal,

    /// Salary minus the exact deduction, not rounded to öre.
    pub pension_base_monthly: Decimal,

    /// True when the salary after deduction falls below the monthly
    /// pension income base cap.
    pub pension_cap_affected: bool,

    pub max_car_price_standard: Decimal,
    pub max_car_price_electric: Decimal,
}
