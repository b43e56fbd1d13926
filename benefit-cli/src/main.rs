use std::path::PathBuf;
use std::process::ExitCode;

use benefit_cli::app::{ReferenceData, render_municipalities, render_years};
use benefit_cli::form::{BenefitForm, DEFAULT_MUNICIPALITY};
use benefit_cli::logging;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net salary calculator for a company car taken through gross salary
/// exchange, using a simplified Swedish tax model.
#[derive(Debug, Parser)]
#[command(name = "benefit", version, about)]
struct Cli {
    /// TOML file with additional tax years and municipal rates.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV file (`municipality,rate`) extending the municipal rate table.
    #[arg(long, global = true)]
    municipal_rates: Option<PathBuf>,

    /// Tax year to use. Defaults to the latest available year.
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log calculation details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate net pay for a salary exchange.
    Calculate(FormArgs),
    /// List municipalities and their tax rates.
    Municipalities,
    /// List available tax years.
    Years,
}

/// Form fields, entered the way they would be typed in Swedish
/// (`67 000`, `33,93`).
#[derive(Debug, Args)]
struct FormArgs {
    /// Gross monthly salary.
    #[arg(long)]
    salary: String,

    /// Municipality for the tax rate lookup.
    #[arg(long, default_value = DEFAULT_MUNICIPALITY)]
    municipality: String,

    /// Municipal tax rate in percent; overrides the municipality lookup.
    #[arg(long, default_value = "")]
    manual_rate: String,

    /// Car price including VAT.
    #[arg(long)]
    car_price: String,

    /// Monthly benefit value of the car.
    #[arg(long, default_value = "")]
    benefit: String,

    /// Gross deduction rate in percent. Defaults to the tax year's rate.
    #[arg(long, default_value = "")]
    deduction_rate: String,

    /// Age at the start of the year: `under66` or `66plus`.
    #[arg(long, default_value = "under66")]
    age_group: String,
}

impl From<FormArgs> for BenefitForm {
    fn from(args: FormArgs) -> Self {
        BenefitForm {
            salary: args.salary,
            municipality: args.municipality,
            manual_tax_rate: args.manual_rate,
            car_price: args.car_price,
            benefit_value: args.benefit,
            deduction_rate: args.deduction_rate,
            age_group: args.age_group,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let reference = ReferenceData::load(cli.config.as_deref(), cli.municipal_rates.as_deref())?;
    debug!(
        years = ?reference.registry.available_years(),
        municipalities = reference.municipal_rates.len(),
        "reference data ready"
    );

    match cli.command {
        Command::Calculate(args) => {
            let params = reference.year(cli.year)?;
            let form = BenefitForm::from(args);
            let outcome = reference.evaluate(Some(params.tax_year), &form)?;
            println!("{}", outcome.render(params));
            if outcome.is_rejected() {
                info!("input rejected");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Municipalities => print!("{}", render_municipalities(&reference.municipal_rates)),
        Command::Years => print!("{}", render_years(&reference.registry)),
    }

    Ok(ExitCode::SUCCESS)
}
