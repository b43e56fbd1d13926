//! Net salary under a gross salary exchange for a company car.
//!
//! The employee gives up part of the gross salary (car price × deduction
//! rate) and is instead taxed on the car's benefit value. The calculation is
//! a simplified Swedish model: a flat municipal rate plus state tax above an
//! annual threshold. Basic deduction, earned-income tax credit, church fee
//! and tax tables are not modelled.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross deduction (car price × deduction rate) |
//! | 2    | Taxable income (salary − step 1 + benefit value, minimum 0) |
//! | 3    | Municipal tax (step 2 × municipal rate) |
//! | 4    | Annual approximation (step 2 × 12) |
//! | 5    | State tax (step 4 above threshold × state rate), then ÷ 12 |
//! | 6    | Total tax (step 3 + step 5) |
//! | 7    | Net pay (salary − step 6), and × 12 |
//! | 8    | Pension base (salary − step 1) against the monthly cap |
//! | 9    | Car price ceilings (7.5 and 10 price base amounts) |
//!
//! Every amount is rounded to öre as soon as it is produced, except the
//! pension base, which compares the exact deduction against the cap.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use benefit_core::{
//!     AgeGroup, CalculationInput, MunicipalRateTable, SalaryExchangeCalculator, YearParameters,
//! };
//!
//! let params = YearParameters {
//!     tax_year: 2026,
//!     price_base_amount: dec!(59200),
//!     state_tax_threshold: dec!(643000),
//!     state_tax_rate: dec!(0.20),
//!     pension_monthly_cap: dec!(52125),
//!     default_deduction_rate: dec!(0.0195),
//! };
//! let mut rates = MunicipalRateTable::new();
//! rates.insert("Håbo", dec!(0.3393)).unwrap();
//!
//! let input = CalculationInput {
//!     gross_monthly_salary: dec!(67000),
//!     car_price: dec!(592000),
//!     benefit_value_monthly: dec!(4000),
//!     deduction_rate: dec!(0.0195),
//!     municipality: "Håbo".to_string(),
//!     manual_tax_rate: None,
//!     age_group: AgeGroup::UnderPensionAge,
//! };
//!
//! let calculator = SalaryExchangeCalculator::new(&params, &rates);
//! let result = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(result.taxable_income_monthly, dec!(59456));
//! assert_eq!(result.total_tax_monthly, dec!(21347.95));
//! assert_eq!(result.net_pay_monthly, dec!(45652.05));
//! assert!(!result.pension_cap_affected);
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{MONTHS_PER_YEAR, non_negative, round_ore};
use crate::calculations::validation::{MAX_DEDUCTION_RATE, ValidationErrors, ValidationFailure};
use crate::{CalculationInput, CalculationResult, MunicipalRateTable, TaxRateSource, YearParameters};

/// Calculator for one tax year and one municipal rate table.
///
/// Holds only shared references to read-only reference data, so a single
/// instance can serve any number of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct SalaryExchangeCalculator<'a> {
    params: &'a YearParameters,
    municipal_rates: &'a MunicipalRateTable,
}

impl<'a> SalaryExchangeCalculator<'a> {
    pub fn new(
        params: &'a YearParameters,
        municipal_rates: &'a MunicipalRateTable,
    ) -> Self {
        Self {
            params,
            municipal_rates,
        }
    }

    pub fn params(&self) -> &'a YearParameters {
        self.params
    }

    pub fn municipal_rates(&self) -> &'a MunicipalRateTable {
        self.municipal_rates
    }

    /// Validates `input` and computes the full breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every violated constraint when
    /// the input is invalid. No amounts are computed in that case. Amounts
    /// that pass validation but overflow a step are reported as
    /// [`ValidationFailure::AmountTooLarge`].
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, ValidationErrors> {
        let (tax_rate, tax_rate_source) = self.validate(input)?;

        self.compute(input, tax_rate, tax_rate_source).ok_or_else(|| {
            debug!(
                tax_year = self.params.tax_year,
                salary = %input.gross_monthly_salary,
                car_price = %input.car_price,
                "calculation overflowed"
            );
            ValidationErrors::new(vec![ValidationFailure::AmountTooLarge])
        })
    }

    /// Runs steps 1 to 9 on validated input. `None` when a step overflows.
    fn compute(
        &self,
        input: &CalculationInput,
        tax_rate: Decimal,
        tax_rate_source: TaxRateSource,
    ) -> Option<CalculationResult> {
        let gross_deduction = self.gross_deduction(input.car_price, input.deduction_rate)?;
        let taxable_income = self.taxable_income(
            input.gross_monthly_salary,
            gross_deduction,
            input.benefit_value_monthly,
        )?;
        let municipal_tax = self.municipal_tax(taxable_income, tax_rate)?;

        let taxable_annual_approx = self.annualize(taxable_income)?;
        let state_tax_annual = self.state_tax_annual(taxable_annual_approx)?;
        let state_tax_monthly = self.state_tax_monthly(state_tax_annual);

        let total_tax = self.total_tax(municipal_tax, state_tax_monthly)?;

        let net_pay_monthly = self.net_pay(input.gross_monthly_salary, total_tax)?;
        let net_pay_annual = self.annualize(net_pay_monthly)?;

        let pension_base = self.pension_base(
            input.gross_monthly_salary,
            input.car_price,
            input.deduction_rate,
        )?;
        let pension_cap_affected = self.is_pension_cap_affected(pension_base);

        debug!(
            tax_year = self.params.tax_year,
            taxable_income = %taxable_income,
            total_tax = %total_tax,
            net_pay_monthly = %net_pay_monthly,
            "salary exchange calculated"
        );

        Some(CalculationResult {
            tax_year: self.params.tax_year,
            gross_deduction_monthly: gross_deduction,
            taxable_income_monthly: taxable_income,
            applied_tax_rate: tax_rate,
            tax_rate_source,
            municipal_tax_monthly: municipal_tax,
            taxable_income_annual_approx: taxable_annual_approx,
            state_tax_annual,
            state_tax_monthly,
            total_tax_monthly: total_tax,
            net_pay_monthly,
            net_pay_annual,
            pension_base_monthly: pension_base,
            pension_cap_affected,
            max_car_price_standard: self.params.max_car_price_standard(),
            max_car_price_electric: self.params.max_car_price_electric(),
        })
    }

    /// Checks every input constraint and resolves the municipal tax rate.
    ///
    /// All checks run; failures are reported together in check order.
    pub fn validate(
        &self,
        input: &CalculationInput,
    ) -> Result<(Decimal, TaxRateSource), ValidationErrors> {
        let mut failures = Vec::new();

        if input.gross_monthly_salary <= Decimal::ZERO {
            failures.push(ValidationFailure::NonPositiveSalary);
        }
        if input.car_price <= Decimal::ZERO {
            failures.push(ValidationFailure::NonPositiveCarPrice);
        }
        if input.benefit_value_monthly < Decimal::ZERO {
            failures.push(ValidationFailure::NegativeBenefitValue);
        }
        if input.deduction_rate <= Decimal::ZERO || input.deduction_rate > MAX_DEDUCTION_RATE {
            failures.push(ValidationFailure::DeductionRateOutOfRange);
        }

        let resolved = self.resolve_tax_rate(&input.municipality, input.manual_tax_rate);
        if resolved.is_none() {
            failures.push(ValidationFailure::TaxRateUnresolved);
        }

        match resolved {
            Some(resolved) if failures.is_empty() => Ok(resolved),
            _ => {
                debug!(
                    failures = failures.len(),
                    municipality = %input.municipality,
                    "calculation input rejected"
                );
                Err(ValidationErrors::new(failures))
            }
        }
    }

    /// Picks the municipal tax rate. A manual rate always wins over the
    /// table entry.
    pub fn resolve_tax_rate(
        &self,
        municipality: &str,
        manual_rate: Option<Decimal>,
    ) -> Option<(Decimal, TaxRateSource)> {
        if let Some(rate) = manual_rate {
            return Some((rate, TaxRateSource::Manual));
        }
        self.municipal_rates
            .rate(municipality)
            .map(|rate| (rate, TaxRateSource::Municipality(municipality.to_string())))
    }

    /// Gross salary given up for the car each month.
    fn gross_deduction(
        &self,
        car_price: Decimal,
        deduction_rate: Decimal,
    ) -> Option<Decimal> {
        car_price.checked_mul(deduction_rate).map(round_ore)
    }

    fn taxable_income(
        &self,
        salary: Decimal,
        gross_deduction: Decimal,
        benefit_value: Decimal,
    ) -> Option<Decimal> {
        let taxable = salary.checked_sub(gross_deduction)?.checked_add(benefit_value)?;
        Some(non_negative(round_ore(taxable)))
    }

    fn municipal_tax(
        &self,
        taxable_income: Decimal,
        tax_rate: Decimal,
    ) -> Option<Decimal> {
        taxable_income.checked_mul(tax_rate).map(round_ore)
    }

    fn annualize(
        &self,
        monthly: Decimal,
    ) -> Option<Decimal> {
        monthly.checked_mul(MONTHS_PER_YEAR)
    }

    /// State tax on the part of the annual approximation above the threshold.
    fn state_tax_annual(
        &self,
        taxable_annual_approx: Decimal,
    ) -> Option<Decimal> {
        let above_threshold =
            non_negative(taxable_annual_approx.checked_sub(self.params.state_tax_threshold)?);
        above_threshold
            .checked_mul(self.params.state_tax_rate)
            .map(round_ore)
    }

    fn state_tax_monthly(
        &self,
        state_tax_annual: Decimal,
    ) -> Decimal {
        round_ore(state_tax_annual / MONTHS_PER_YEAR)
    }

    fn total_tax(
        &self,
        municipal_tax: Decimal,
        state_tax: Decimal,
    ) -> Option<Decimal> {
        municipal_tax.checked_add(state_tax)
    }

    /// The gross deduction already lowered the tax; it is not subtracted
    /// from the salary a second time.
    fn net_pay(
        &self,
        salary: Decimal,
        total_tax: Decimal,
    ) -> Option<Decimal> {
        salary.checked_sub(total_tax)
    }

    /// Salary after the exact, unrounded deduction, so the cap comparison
    /// does not depend on öre rounding.
    fn pension_base(
        &self,
        salary: Decimal,
        car_price: Decimal,
        deduction_rate: Decimal,
    ) -> Option<Decimal> {
        salary.checked_sub(car_price.checked_mul(deduction_rate)?)
    }

    fn is_pension_cap_affected(
        &self,
        pension_base: Decimal,
    ) -> bool {
        pension_base < self.params.pension_monthly_cap
    }
}
