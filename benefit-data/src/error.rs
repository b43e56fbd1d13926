use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when loading reference data files.
#[derive(Debug, Error)]
pub enum ReferenceLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("municipality '{0}' is listed more than once")]
    DuplicateMunicipality(String),

    #[error("tax year {0} is listed more than once")]
    DuplicateTaxYear(i32),

    #[error("rate {rate} for '{name}' is outside [0, 1)")]
    InvalidRate { name: String, rate: Decimal },

    #[error(
        "default_deduction_rate {rate} for tax year {tax_year} must be above 0 and at most {max}"
    )]
    InvalidDefaultDeductionRate {
        tax_year: i32,
        rate: Decimal,
        max: Decimal,
    },

    #[error("{field} for tax year {tax_year} must be positive, got {value}")]
    InvalidAmount {
        tax_year: i32,
        field: &'static str,
        value: Decimal,
    },
}

impl From<csv::Error> for ReferenceLoaderError {
    fn from(err: csv::Error) -> Self {
        ReferenceLoaderError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for ReferenceLoaderError {
    fn from(err: toml::de::Error) -> Self {
        ReferenceLoaderError::TomlParse(err.to_string())
    }
}

/// Rates are fractions; a rate of 1 or more is almost certainly a percentage.
pub(crate) fn check_rate(
    name: &str,
    rate: Decimal,
) -> Result<(), ReferenceLoaderError> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(ReferenceLoaderError::InvalidRate {
            name: name.to_string(),
            rate,
        });
    }
    Ok(())
}
