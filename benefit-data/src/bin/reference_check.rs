use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use benefit_core::MunicipalRateTable;
use benefit_core::YearParameterRegistry;
use benefit_data::{MunicipalRateLoader, ReferenceFileLoader};
use clap::Parser;

/// Validate reference data files before handing them to the calculator.
///
/// Reads a TOML reference file and/or a municipal rate CSV (columns
/// `municipality,rate`), reports what they contain, and fails on the first
/// invalid entry.
#[derive(Parser, Debug)]
#[command(name = "reference-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with `[[year]]` parameter sets and `[municipalities]` rates
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file with municipal tax rates
    #[arg(short, long)]
    rates: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.config.is_none() && args.rates.is_none() {
        bail!("nothing to check; pass --config and/or --rates");
    }

    let mut registry = YearParameterRegistry::new();
    let mut rates = MunicipalRateTable::new();

    if let Some(path) = &args.config {
        println!("Checking reference file: {}", path.display());
        let file = ReferenceFileLoader::load_file(path)
            .with_context(|| format!("Invalid reference file: {}", path.display()))?;
        file.apply_to(&mut registry, &mut rates);
    }

    if let Some(path) = &args.rates {
        println!("Checking municipal rates: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let table = MunicipalRateLoader::load(file)
            .with_context(|| format!("Invalid municipal rate CSV: {}", path.display()))?;
        rates.merge(&table);
    }

    for year in registry.available_years() {
        let params = registry.get(year)?;
        println!(
            "Tax year {}: price base amount {}, state tax threshold {}, pension cap {}",
            params.tax_year,
            params.price_base_amount,
            params.state_tax_threshold,
            params.pension_monthly_cap
        );
    }
    println!("{} municipalities with tax rates.", rates.len());

    Ok(())
}
