pub mod calculations;
pub mod models;
pub mod reference;

pub use calculations::{SalaryExchangeCalculator, ValidationErrors, ValidationFailure};
pub use models::*;
pub use reference::{ReferenceDataError, YearParameterRegistry};
