//! Raw form input and its conversion into a [`CalculationInput`].

use benefit_core::{
    AgeGroup, CalculationInput, CalculationResult, SalaryExchangeCalculator, ValidationErrors,
    YearParameters,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::utils::{parse_decimal, parse_optional_decimal, percent_to_fraction};

/// Municipality preselected in an empty form.
pub const DEFAULT_MUNICIPALITY: &str = "Håbo";

/// A form field that could not be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field}: '{input}' is not a number")]
    InvalidNumber { field: &'static str, input: String },

    #[error("age group: unknown value '{0}'")]
    UnknownAgeGroup(String),
}

#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields could not be parsed; the calculator was not run.
    #[error("invalid form input: {}", join_field_errors(.0))]
    InvalidFields(Vec<FieldError>),

    /// The parsed input was rejected by the calculator.
    #[error(transparent)]
    Rejected(#[from] ValidationErrors),
}

impl FormError {
    /// Every message to show the user, in field order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidFields(errors) => errors.iter().map(ToString::to_string).collect(),
            Self::Rejected(errors) => errors.messages(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Form state as typed by the user.
///
/// Numbers use Swedish formatting (`67 000`, `33,93`). The manual tax rate
/// and deduction rate are percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitForm {
    pub salary: String,
    pub municipality: String,
    pub manual_tax_rate: String,
    pub car_price: String,
    pub benefit_value: String,
    /// Empty means the tax year's default rate.
    pub deduction_rate: String,
    pub age_group: String,
}

impl Default for BenefitForm {
    fn default() -> Self {
        Self {
            salary: String::new(),
            municipality: DEFAULT_MUNICIPALITY.to_string(),
            manual_tax_rate: String::new(),
            car_price: String::new(),
            benefit_value: String::new(),
            deduction_rate: String::new(),
            age_group: AgeGroup::default().as_str().to_string(),
        }
    }
}

impl BenefitForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the form into a [`CalculationInput`], collecting every field
    /// error.
    ///
    /// A manual tax rate that does not parse is dropped (with a warning),
    /// leaving the municipality lookup to decide.
    pub fn to_input(
        &self,
        params: &YearParameters,
    ) -> Result<CalculationInput, FormError> {
        let mut errors = Vec::new();

        let salary = parse_required("salary", &self.salary, &mut errors);
        let car_price = parse_required("car price", &self.car_price, &mut errors);
        let benefit_value = parse_required("benefit value", &self.benefit_value, &mut errors);

        let deduction_rate = if self.deduction_rate.trim().is_empty() {
            params.default_deduction_rate
        } else {
            percent_to_fraction(parse_required(
                "deduction rate",
                &self.deduction_rate,
                &mut errors,
            ))
        };

        let manual_tax_rate = parse_optional_decimal(&self.manual_tax_rate).map(percent_to_fraction);

        let age_group = AgeGroup::parse(self.age_group.trim()).unwrap_or_else(|| {
            errors.push(FieldError::UnknownAgeGroup(self.age_group.clone()));
            AgeGroup::default()
        });

        if !errors.is_empty() {
            debug!(errors = errors.len(), "form rejected before calculation");
            return Err(FormError::InvalidFields(errors));
        }

        Ok(CalculationInput {
            gross_monthly_salary: salary,
            car_price,
            benefit_value_monthly: benefit_value,
            deduction_rate,
            municipality: self.municipality.trim().to_string(),
            manual_tax_rate,
            age_group,
        })
    }

    /// Parse the form and run the calculator.
    pub fn submit(
        &self,
        calculator: &SalaryExchangeCalculator<'_>,
    ) -> Result<CalculationResult, FormError> {
        let input = self.to_input(calculator.params())?;
        Ok(calculator.calculate(&input)?)
    }
}

fn parse_required(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Decimal {
    parse_decimal(value).unwrap_or_else(|e| {
        errors.push(FieldError::InvalidNumber {
            field,
            input: e.input().to_string(),
        });
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use benefit_core::reference::builtin;
    use benefit_core::{MunicipalRateTable, TaxRateSource, ValidationFailure};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn filled_form() -> BenefitForm {
        BenefitForm {
            salary: "67 000".to_string(),
            car_price: "592 000".to_string(),
            benefit_value: "4 000".to_string(),
            ..BenefitForm::new()
        }
    }

    fn reference() -> (YearParameters, MunicipalRateTable) {
        (builtin::year_parameters_2026(), builtin::municipal_rates_2026())
    }

    #[test]
    fn to_input_parses_swedish_numbers() {
        let (params, _) = reference();

        let input = filled_form().to_input(&params).unwrap();

        assert_eq!(
            input,
            CalculationInput {
                gross_monthly_salary: dec!(67000),
                car_price: dec!(592000),
                benefit_value_monthly: dec!(4000),
                deduction_rate: dec!(0.0195),
                municipality: "Håbo".to_string(),
                manual_tax_rate: None,
                age_group: AgeGroup::UnderPensionAge,
            }
        );
    }

    #[test]
    fn to_input_converts_percent_fields() {
        let (params, _) = reference();
        let form = BenefitForm {
            deduction_rate: "2,5".to_string(),
            manual_tax_rate: "33,93".to_string(),
            ..filled_form()
        };

        let input = form.to_input(&params).unwrap();

        assert_eq!(input.deduction_rate, dec!(0.025));
        assert_eq!(input.manual_tax_rate, Some(dec!(0.3393)));
    }

    #[test]
    fn to_input_drops_unparseable_manual_rate() {
        let (params, _) = reference();
        let form = BenefitForm {
            manual_tax_rate: "n/a".to_string(),
            ..filled_form()
        };

        let input = form.to_input(&params).unwrap();

        assert_eq!(input.manual_tax_rate, None);
    }

    #[test]
    fn to_input_collects_every_field_error() {
        let (params, _) = reference();
        let form = BenefitForm {
            salary: "lots".to_string(),
            car_price: "1.2.3".to_string(),
            age_group: "young".to_string(),
            ..filled_form()
        };

        let err = form.to_input(&params).unwrap_err();

        assert_eq!(
            err.messages(),
            vec![
                "salary: 'lots' is not a number".to_string(),
                "car price: '1.2.3' is not a number".to_string(),
                "age group: unknown value 'young'".to_string(),
            ]
        );
    }

    #[test]
    fn to_input_accepts_pension_age_group() {
        let (params, _) = reference();
        let form = BenefitForm {
            age_group: "66plus".to_string(),
            ..filled_form()
        };

        let input = form.to_input(&params).unwrap();

        assert_eq!(input.age_group, AgeGroup::PensionAgeOrOlder);
    }

    #[test]
    fn submit_returns_breakdown() {
        let (params, rates) = reference();
        let calculator = SalaryExchangeCalculator::new(&params, &rates);

        let result = filled_form().submit(&calculator).unwrap();

        assert_eq!(result.net_pay_monthly, dec!(45652.05));
        assert_eq!(
            result.tax_rate_source,
            TaxRateSource::Municipality("Håbo".to_string())
        );
    }

    #[test]
    fn submit_empty_form_reports_core_failures() {
        let (params, rates) = reference();
        let calculator = SalaryExchangeCalculator::new(&params, &rates);

        let err = BenefitForm::new().submit(&calculator).unwrap_err();

        let FormError::Rejected(errors) = err else {
            panic!("Expected Rejected error, got: {:?}", err);
        };
        assert_eq!(
            errors.failures(),
            &[
                ValidationFailure::NonPositiveSalary,
                ValidationFailure::NonPositiveCarPrice,
            ]
        );
    }

    #[test]
    fn submit_unknown_municipality_requires_manual_rate() {
        let (params, rates) = reference();
        let calculator = SalaryExchangeCalculator::new(&params, &rates);
        let form = BenefitForm {
            municipality: "Kiruna".to_string(),
            ..filled_form()
        };

        let err = form.submit(&calculator).unwrap_err();

        assert_eq!(
            err.messages(),
            vec!["unknown municipality, manual rate required".to_string()]
        );
    }
}
