//! Salary exchange calculations.
//!
//! The calculator validates a [`CalculationInput`](crate::CalculationInput)
//! and then runs the fixed sequence of monthly tax steps against a set of
//! [`YearParameters`](crate::YearParameters).

pub mod common;
pub mod salary_exchange;
pub mod validation;

pub use salary_exchange::SalaryExchangeCalculator;
pub use validation::{ValidationErrors, ValidationFailure};
