use std::collections::BTreeMap;

use thiserror::Error;

use super::builtin;
use crate::YearParameters;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceDataError {
    #[error("no parameters for tax year {year}; available: {available:?}")]
    UnknownTaxYear { year: i32, available: Vec<i32> },

    #[error("no tax years registered")]
    Empty,
}

/// Registry of [`YearParameters`], keyed by tax year.
///
/// Typical lifetime:
/// 1. Start from `YearParameterRegistry::builtin()` or `new()`.
/// 2. Call `register` for each year loaded from configuration.
/// 3. Call `get` with the year the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearParameterRegistry {
    years: BTreeMap<i32, YearParameters>,
}

impl YearParameterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the parameter sets shipped with the crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::year_parameters_2026());
        registry
    }

    /// Register a parameter set. An existing set for the same tax year is
    /// replaced.
    pub fn register(
        &mut self,
        params: YearParameters,
    ) {
        self.years.insert(params.tax_year, params);
    }

    /// Every registered tax year in ascending order.
    pub fn available_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn get(
        &self,
        year: i32,
    ) -> Result<&YearParameters, ReferenceDataError> {
        self.years
            .get(&year)
            .ok_or_else(|| ReferenceDataError::UnknownTaxYear {
                year,
                available: self.available_years(),
            })
    }

    /// The most recent registered tax year.
    pub fn latest(&self) -> Result<&YearParameters, ReferenceDataError> {
        self.years
            .values()
            .next_back()
            .ok_or(ReferenceDataError::Empty)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
