//! Reference data shipped with the crate.

use rust_decimal::Decimal;

use crate::{MunicipalRateTable, YearParameters};

/// Tax year parameters for 2026.
pub fn year_parameters_2026() -> YearParameters {
    YearParameters {
        tax_year: 2026,
        price_base_amount: Decimal::from(59_200),
        state_tax_threshold: Decimal::from(643_000),
        state_tax_rate: Decimal::new(20, 2),
        pension_monthly_cap: Decimal::from(52_125),
        default_deduction_rate: Decimal::new(195, 4),
    }
}

/// Combined municipal and regional rates (excluding church fee) for a
/// handful of municipalities. Load a full list through `benefit-data`.
pub fn municipal_rates_2026() -> MunicipalRateTable {
    [
        ("Håbo", Decimal::new(3393, 4)),
        ("Stockholm", Decimal::new(2978, 4)),
        ("Göteborg", Decimal::new(3200, 4)),
        ("Malmö", Decimal::new(3280, 4)),
        ("Uppsala", Decimal::new(3290, 4)),
    ]
    .into_iter()
    .collect()
}
