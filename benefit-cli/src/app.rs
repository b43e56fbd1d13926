use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use benefit_core::reference::builtin;
use benefit_core::{
    CalculationResult, MunicipalRateTable, ReferenceDataError, SalaryExchangeCalculator,
    YearParameterRegistry, YearParameters,
};
use benefit_data::{MunicipalRateLoader, ReferenceFileLoader};
use tracing::{debug, info};

use crate::form::{BenefitForm, FormError};
use crate::report::{format_money, format_percent, render_failures, render_result};

/// Tax year parameters and municipal rates available to the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub registry: YearParameterRegistry,
    pub municipal_rates: MunicipalRateTable,
}

impl ReferenceData {
    /// The data shipped with `benefit-core`.
    pub fn builtin() -> Self {
        Self {
            registry: YearParameterRegistry::builtin(),
            municipal_rates: builtin::municipal_rates_2026(),
        }
    }

    /// Built-in data, then the TOML reference file, then the municipal rate
    /// CSV, each layered over the previous one.
    pub fn load(
        config: Option<&Path>,
        municipal_rates: Option<&Path>,
    ) -> Result<Self> {
        let mut data = Self::builtin();

        if let Some(path) = config {
            let file = ReferenceFileLoader::load_file(path)
                .with_context(|| format!("Failed to load reference file: {}", path.display()))?;
            file.apply_to(&mut data.registry, &mut data.municipal_rates);
            info!(
                path = %path.display(),
                years = file.years.len(),
                municipalities = file.municipal_rates.len(),
                "loaded reference file"
            );
        }

        if let Some(path) = municipal_rates {
            let reader =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            let table = MunicipalRateLoader::load(reader)
                .with_context(|| format!("Failed to load municipal rates: {}", path.display()))?;
            info!(
                path = %path.display(),
                municipalities = table.len(),
                "loaded municipal rates"
            );
            data.municipal_rates.merge(&table);
        }

        Ok(data)
    }

    /// Parameters for `year`, or for the latest registered year.
    pub fn year(
        &self,
        year: Option<i32>,
    ) -> Result<&YearParameters, ReferenceDataError> {
        match year {
            Some(year) => self.registry.get(year),
            None => self.registry.latest(),
        }
    }

    /// Run the form through the calculator for the selected year.
    pub fn evaluate(
        &self,
        year: Option<i32>,
        form: &BenefitForm,
    ) -> Result<Outcome, ReferenceDataError> {
        let params = self.year(year)?;
        debug!(tax_year = params.tax_year, "evaluating form");
        let calculator = SalaryExchangeCalculator::new(params, &self.municipal_rates);

        Ok(match form.submit(&calculator) {
            Ok(result) => Outcome::Calculated(result),
            Err(err) => Outcome::Rejected(err),
        })
    }
}

/// What the user gets back for one form submission.
#[derive(Debug)]
pub enum Outcome {
    Calculated(CalculationResult),
    Rejected(FormError),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn render(
        &self,
        params: &YearParameters,
    ) -> String {
        match self {
            Self::Calculated(result) => render_result(result, params),
            Self::Rejected(err) => render_failures(&err.messages()),
        }
    }
}

/// Table of municipalities and their rates, one per line.
pub fn render_municipalities(rates: &MunicipalRateTable) -> String {
    rates
        .iter()
        .map(|(name, rate)| format!("{name:<20}{:>10}\n", format_percent(rate)))
        .collect()
}

/// One line per registered tax year with its key parameters.
pub fn render_years(registry: &YearParameterRegistry) -> String {
    registry
        .available_years()
        .into_iter()
        .filter_map(|year| registry.get(year).ok())
        .map(|params| {
            format!(
                "{}: price base amount {}, state tax threshold {}, pension cap {}/month, default deduction {}\n",
                params.tax_year,
                format_money(params.price_base_amount),
                format_money(params.state_tax_threshold),
                format_money(params.pension_monthly_cap),
                format_percent(params.default_deduction_rate)
            )
        })
        .collect()
}
