use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of a plausible gross deduction rate (10 %).
pub const MAX_DEDUCTION_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// A single violated input constraint.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("salary must be positive")]
    NonPositiveSalary,

    #[error("car price must be positive")]
    NonPositiveCarPrice,

    #[error("benefit value cannot be negative")]
    NegativeBenefitValue,

    #[error("deduction rate out of plausible range")]
    DeductionRateOutOfRange,

    #[error("unknown municipality, manual rate required")]
    TaxRateUnresolved,

    /// Input passed every check but an intermediate amount overflowed.
    #[error("amounts too large to calculate")]
    AmountTooLarge,
}

/// Every constraint an input violated, in check order.
///
/// Never empty when returned from the calculator.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("invalid calculation input: {}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    pub(crate) fn new(failures: Vec<ValidationFailure>) -> Self {
        Self(failures)
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    pub fn contains(
        &self,
        failure: ValidationFailure,
    ) -> bool {
        self.0.contains(&failure)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable messages, one per failure.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

fn join_messages(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn max_deduction_rate_is_ten_percent() {
        assert_eq!(MAX_DEDUCTION_RATE, dec!(0.10));
    }

    #[test]
    fn display_joins_all_messages() {
        let errors = ValidationErrors::new(vec![
            ValidationFailure::NonPositiveSalary,
            ValidationFailure::TaxRateUnresolved,
        ]);

        assert_eq!(
            errors.to_string(),
            "invalid calculation input: salary must be positive; \
             unknown municipality, manual rate required"
        );
    }

    #[test]
    fn messages_preserve_order() {
        let errors = ValidationErrors::new(vec![
            ValidationFailure::NegativeBenefitValue,
            ValidationFailure::NonPositiveCarPrice,
        ]);

        assert_eq!(
            errors.messages(),
            vec![
                "benefit value cannot be negative".to_string(),
                "car price must be positive".to_string(),
            ]
        );
    }
}
