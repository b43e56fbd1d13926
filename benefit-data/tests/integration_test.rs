//! Integration tests loading the on-disk reference fixtures and feeding them
//! to the calculator.

use benefit_core::{
    AgeGroup, CalculationInput, MunicipalRateTable, SalaryExchangeCalculator, TaxRateSource,
    YearParameterRegistry,
};
use benefit_data::{MunicipalRateLoader, ReferenceFileLoader};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const REFERENCE_2026: &str = include_str!("../test-data/reference_2026.toml");
const MUNICIPAL_RATES_CSV: &str = include_str!("../test-data/municipal_rates.csv");

fn load_reference() -> (YearParameterRegistry, MunicipalRateTable) {
    let file = ReferenceFileLoader::parse(REFERENCE_2026).expect("Failed to parse reference file");
    let mut registry = YearParameterRegistry::new();
    let mut rates = MunicipalRateTable::new();
    file.apply_to(&mut registry, &mut rates);
    (registry, rates)
}

fn habo_input() -> CalculationInput {
    CalculationInput {
        gross_monthly_salary: dec!(67000),
        car_price: dec!(592000),
        benefit_value_monthly: dec!(4000),
        deduction_rate: dec!(0.0195),
        municipality: "Håbo".to_string(),
        manual_tax_rate: None,
        age_group: AgeGroup::UnderPensionAge,
    }
}

#[test]
fn test_reference_fixture_matches_builtin_data() {
    let (registry, rates) = load_reference();

    assert_eq!(registry, YearParameterRegistry::builtin());
    assert_eq!(rates, benefit_core::reference::builtin::municipal_rates_2026());
}

#[test]
fn test_calculate_with_loaded_reference() {
    let (registry, rates) = load_reference();
    let params = registry.get(2026).expect("2026 should be loaded");
    let calculator = SalaryExchangeCalculator::new(params, &rates);

    let result = calculator.calculate(&habo_input()).expect("input is valid");

    assert_eq!(result.net_pay_monthly, dec!(45652.05));
    assert_eq!(result.max_car_price_standard, dec!(444000));
}

#[test]
fn test_csv_extends_municipalities() {
    let (registry, mut rates) = load_reference();
    let csv_table =
        MunicipalRateLoader::load(MUNICIPAL_RATES_CSV.as_bytes()).expect("Failed to load CSV");
    rates.merge(&csv_table);
    let params = registry.get(2026).expect("2026 should be loaded");
    let calculator = SalaryExchangeCalculator::new(params, &rates);

    let result = calculator
        .calculate(&CalculationInput {
            municipality: "Kiruna".to_string(),
            ..habo_input()
        })
        .expect("Kiruna is in the CSV");

    assert_eq!(rates.len(), 7);
    assert_eq!(result.applied_tax_rate, dec!(0.3455));
    assert_eq!(
        result.tax_rate_source,
        TaxRateSource::Municipality("Kiruna".to_string())
    );
}

#[test]
fn test_unknown_municipality_without_csv_is_rejected() {
    let (registry, rates) = load_reference();
    let params = registry.get(2026).expect("2026 should be loaded");
    let calculator = SalaryExchangeCalculator::new(params, &rates);

    let err = calculator
        .calculate(&CalculationInput {
            municipality: "Kiruna".to_string(),
            ..habo_input()
        })
        .expect_err("Kiruna is not in the TOML table");

    assert_eq!(
        err.messages(),
        vec!["unknown municipality, manual rate required".to_string()]
    );
}
