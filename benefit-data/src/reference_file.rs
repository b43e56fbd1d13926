//! TOML reference file holding tax year parameters and municipal rates.
//!
//! ## Format
//!
//! ```toml
//! [[year]]
//! tax_year = 2026
//! price_base_amount = 59200
//! state_tax_threshold = 643000
//! state_tax_rate = 0.20
//! pension_monthly_cap = 52125
//! default_deduction_rate = 0.0195
//!
//! [municipalities]
//! "Håbo" = 0.3393
//! "Stockholm" = 0.2978
//! ```
//!
//! Both sections are optional. Rates are fractions.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use benefit_core::calculations::validation::MAX_DEDUCTION_RATE;
use benefit_core::{MunicipalRateTable, YearParameterRegistry, YearParameters};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ReferenceLoaderError, check_rate};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReferenceFile {
    #[serde(default, rename = "year")]
    years: Vec<YearParameters>,
    #[serde(default)]
    municipalities: BTreeMap<String, Decimal>,
}

/// Validated contents of a reference file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFile {
    pub years: Vec<YearParameters>,
    pub municipal_rates: MunicipalRateTable,
}

impl ReferenceFile {
    /// Layers this file over existing reference data: every year replaces
    /// the registered set for that year, and municipal rates override
    /// entries of the same name.
    pub fn apply_to(
        &self,
        registry: &mut YearParameterRegistry,
        rates: &mut MunicipalRateTable,
    ) {
        for params in &self.years {
            registry.register(params.clone());
        }
        rates.merge(&self.municipal_rates);
    }
}

/// Loader for TOML reference files.
pub struct ReferenceFileLoader;

impl ReferenceFileLoader {
    /// Parse and validate reference file contents.
    pub fn parse(contents: &str) -> Result<ReferenceFile, ReferenceLoaderError> {
        let raw: RawReferenceFile = toml::from_str(contents)?;

        let mut seen = HashSet::new();
        for params in &raw.years {
            if !seen.insert(params.tax_year) {
                return Err(ReferenceLoaderError::DuplicateTaxYear(params.tax_year));
            }
            validate_year(params)?;
        }

        let mut municipal_rates = MunicipalRateTable::new();
        for (name, rate) in raw.municipalities {
            check_rate(&name, rate)?;
            municipal_rates
                .insert(name, rate)
                .map_err(|dup| ReferenceLoaderError::DuplicateMunicipality(dup.0))?;
        }

        debug!(
            years = raw.years.len(),
            municipalities = municipal_rates.len(),
            "parsed reference file"
        );

        Ok(ReferenceFile {
            years: raw.years,
            municipal_rates,
        })
    }

    /// Convenience wrapper: read a file from disk and delegate to [`Self::parse`].
    pub fn load_file(path: &Path) -> Result<ReferenceFile, ReferenceLoaderError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReferenceLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }
}

fn validate_year(params: &YearParameters) -> Result<(), ReferenceLoaderError> {
    for (field, value) in [
        ("price_base_amount", params.price_base_amount),
        ("state_tax_threshold", params.state_tax_threshold),
        ("pension_monthly_cap", params.pension_monthly_cap),
    ] {
        if value <= Decimal::ZERO {
            return Err(ReferenceLoaderError::InvalidAmount {
                tax_year: params.tax_year,
                field,
                value,
            });
        }
    }

    check_rate(
        &format!("state_tax_rate ({})", params.tax_year),
        params.state_tax_rate,
    )?;

    // Same range the calculator accepts for an entered rate.
    let rate = params.default_deduction_rate;
    if rate <= Decimal::ZERO || rate > MAX_DEDUCTION_RATE {
        return Err(ReferenceLoaderError::InvalidDefaultDeductionRate {
            tax_year: params.tax_year,
            rate,
            max: MAX_DEDUCTION_RATE,
        });
    }
    Ok(())
}
