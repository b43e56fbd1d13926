mod age_group;
mod calculation_input;
mod calculation_result;
mod municipal_rate_table;
mod year_parameters;

pub use age_group::AgeGroup;
pub use calculation_input::CalculationInput;
pub use calculation_result::{CalculationResult, TaxRateSource};
pub use municipal_rate_table::{DuplicateMunicipality, MunicipalRateTable};
pub use year_parameters::YearParameters;
