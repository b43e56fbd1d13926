//! Swedish-formatted rendering of calculation results.

use benefit_core::{CalculationResult, TaxRateSource, YearParameters};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a number with `decimals` decimals, a space as thousands
/// separator and `decimal_separator` between integer and fraction.
fn format_grouped(
    value: Decimal,
    decimals: u32,
    decimal_separator: char,
) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push(decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// Whole kronor, e.g. `45 652 kr`.
pub fn format_money(value: Decimal) -> String {
    format!("{} kr", format_grouped(value, 0, ','))
}

/// A fraction as a percentage with two decimals, e.g. `33,93 %`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{} %", format_grouped(rate * Decimal::ONE_HUNDRED, 2, ','))
}

/// Renders the full breakdown for display.
pub fn render_result(
    result: &CalculationResult,
    params: &YearParameters,
) -> String {
    let rows = [
        ("Gross deduction / month", result.gross_deduction_monthly),
        ("Taxable income / month", result.taxable_income_monthly),
        ("Municipal tax / month", result.municipal_tax_monthly),
        ("State tax / month", result.state_tax_monthly),
        ("Total tax / month", result.total_tax_monthly),
        ("Net pay / month", result.net_pay_monthly),
        ("Net pay / year", result.net_pay_annual),
    ];
    let position = if result.pension_cap_affected {
        "below"
    } else {
        "above"
    };
    let source = match &result.tax_rate_source {
        TaxRateSource::Municipality(name) => name.clone(),
        TaxRateSource::Manual => "manual".to_string(),
    };

    let mut lines = vec![format!("Result (tax year {})", result.tax_year)];
    lines.extend(
        rows.iter()
            .map(|(label, value)| format!("  {label:<26}{:>14}", format_money(*value))),
    );
    lines.extend([
        String::new(),
        format!(
            "Pension: salary after deduction (≈ {}) is {position} the pension income cap indicator ({}/month).",
            format_money(result.pension_base_monthly),
            format_money(params.pension_monthly_cap)
        ),
        "Occupational pension may also be affected depending on your agreement.".to_string(),
        String::new(),
        "Car price ceilings".to_string(),
        format!(
            "  {:<26}{:>14}",
            "Standard (7.5 × PBB)",
            format_money(result.max_car_price_standard)
        ),
        format!(
            "  {:<26}{:>14}",
            "Electric/plug-in (10 × PBB)",
            format_money(result.max_car_price_electric)
        ),
        String::new(),
        "Details & assumptions".to_string(),
        format!(
            "  Tax rate used: {} ({source})",
            format_percent(result.applied_tax_rate)
        ),
        format!(
            "  State tax threshold: {} / year, {} above",
            format_money(params.state_tax_threshold),
            format_percent(params.state_tax_rate)
        ),
        format!(
            "  State tax uses taxable income × 12 ({}) instead of income after basic deduction,",
            format_money(result.taxable_income_annual_approx)
        ),
        "  so it may come out somewhat higher than in reality.".to_string(),
        "  Tax is an estimate: no tax table, earned-income credit, basic deduction or church fee."
            .to_string(),
    ]);
    lines.join("\n")
}

/// Renders every failure message, one per line.
pub fn render_failures(messages: &[String]) -> String {
    std::iter::once("Check the following:".to_string())
        .chain(messages.iter().map(|message| format!("  - {message}")))
        .collect::<Vec<_>>()
        .join("\n")
}
