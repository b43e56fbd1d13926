use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a municipality is inserted twice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("municipality '{0}' is already in the rate table")]
pub struct DuplicateMunicipality(pub String);

/// Combined municipal and regional income tax rate per municipality,
/// excluding church fee. Names are unique and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MunicipalRateTable {
    rates: BTreeMap<String, Decimal>,
}

impl MunicipalRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a municipality. Existing entries are never overwritten.
    pub fn insert(
        &mut self,
        municipality: impl Into<String>,
        rate: Decimal,
    ) -> Result<(), DuplicateMunicipality> {
        let municipality = municipality.into();
        if self.rates.contains_key(&municipality) {
            return Err(DuplicateMunicipality(municipality));
        }
        self.rates.insert(municipality, rate);
        Ok(())
    }

    /// Copies every entry of `other` into this table; entries of `other`
    /// win on conflicting names.
    pub fn merge(
        &mut self,
        other: &MunicipalRateTable,
    ) {
        for (name, rate) in &other.rates {
            self.rates.insert(name.clone(), *rate);
        }
    }

    pub fn rate(
        &self,
        municipality: &str,
    ) -> Option<Decimal> {
        self.rates.get(municipality).copied()
    }

    pub fn contains(
        &self,
        municipality: &str,
    ) -> bool {
        self.rates.contains_key(municipality)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Builds a table from `(name, rate)` pairs; a later pair replaces an
/// earlier one with the same name, as in [`MunicipalRateTable::merge`].
impl<S: Into<String>> FromIterator<(S, Decimal)> for MunicipalRateTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self {
            rates: iter
                .into_iter()
                .map(|(name, rate)| (name.into(), rate))
                .collect(),
        }
    }
}
