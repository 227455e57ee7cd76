//! Loan Scenario Engine CLI
//!
//! Command-line interface for the loan and investment calculators

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::{json, Value};

use loan_scenario_engine::{
    CalculationRequest, CalculationRunner, DiscountInput, EligibilityInput, LoanTerms,
    LumpsumInput, MoratoriumInput, MoratoriumPolicy, Prepayment, PrepaymentInput,
    RateChangeInput, RunnerConfig, SipInput, SwpInput, TaxTiming,
};

#[derive(Parser)]
#[command(
    name = "loan-engine",
    version,
    about = "Loan amortization, restructuring and investment growth calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Compact single-line JSON output
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// EMI and totals for a loan
    Emi(LoanArgs),
    /// Month-by-month amortization schedule as CSV
    Schedule(ScheduleArgs),
    /// Maximum EMI and loan amount for an income
    Eligibility(EligibilityArgs),
    /// Restructure a loan after a payment moratorium
    Moratorium(MoratoriumArgs),
    /// Effect of a part prepayment
    Prepayment(PrepaymentArgs),
    /// Effect of an interest rate revision
    RateChange(RateChangeArgs),
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Future value of a one-time investment
    Lumpsum(LumpsumArgs),
    /// Systematic withdrawal from a corpus
    Swp(SwpArgs),
    /// Discount and sales tax on a purchase
    Discount(DiscountArgs),
    /// Evaluate JSON request(s) from a file or stdin
    Json(JsonArgs),
}

#[derive(Args)]
struct LoanArgs {
    #[arg(long)]
    principal: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    tenure_months: u32,
}

impl LoanArgs {
    fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.rate, self.tenure_months)
    }
}

#[derive(Args)]
struct ScheduleArgs {
    #[command(flatten)]
    loan: LoanArgs,
    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Aggregate rows by loan year
    #[arg(long)]
    yearly: bool,
    /// Write to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct EligibilityArgs {
    #[arg(long)]
    income: f64,
    /// Fixed obligation to income ratio in percent
    #[arg(long)]
    foir: f64,
    #[arg(long, default_value_t = 0.0)]
    existing_emis: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    tenure_months: u32,
}

#[derive(Args)]
struct MoratoriumArgs {
    #[command(flatten)]
    loan: LoanArgs,
    #[arg(long)]
    moratorium_months: u32,
    /// Keep the tenure and raise the EMI instead of extending the tenure
    #[arg(long)]
    fixed_tenure: bool,
}

#[derive(Args)]
struct PrepaymentArgs {
    #[arg(long)]
    outstanding: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    emi: f64,
    /// Prepayment as an absolute amount
    #[arg(long, conflicts_with = "fraction", required_unless_present = "fraction")]
    amount: Option<f64>,
    /// Prepayment as a share of the outstanding principal, in [0, 1)
    #[arg(long)]
    fraction: Option<f64>,
}

#[derive(Args)]
struct RateChangeArgs {
    #[arg(long)]
    outstanding: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    emi: f64,
    #[arg(long)]
    revised_rate: f64,
}

#[derive(Args)]
struct SipArgs {
    #[arg(long)]
    monthly: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    months: u32,
}

#[derive(Args)]
struct LumpsumArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    months: u32,
}

#[derive(Args)]
struct SwpArgs {
    #[arg(long)]
    corpus: f64,
    #[arg(long)]
    withdrawal: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    months: u32,
}

#[derive(Args)]
struct DiscountArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    discount: f64,
    #[arg(long, default_value_t = 0.0)]
    tax: f64,
    /// Levy tax on the list amount rather than the discounted amount
    #[arg(long)]
    tax_before_discount: bool,
}

#[derive(Args)]
struct JsonArgs {
    /// File holding a request object or an array of requests (stdin if omitted)
    file: Option<PathBuf>,
    /// Include full schedules in EMI outcomes
    #[arg(long)]
    schedule: bool,
}

/// Schedule row as written to CSV
#[derive(Serialize)]
struct ScheduleCsvRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "DueDate")]
    due_date: Option<NaiveDate>,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "Outstanding")]
    outstanding: f64,
}

#[derive(Serialize)]
struct YearCsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Months")]
    months: u32,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Outstanding")]
    outstanding: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let request = match cli.command {
        Commands::Schedule(args) => return write_schedule(&args),
        Commands::Json(args) => {
            let value = run_json(&args)?;
            return print_json(&value, cli.compact);
        }
        Commands::Emi(args) => CalculationRequest::Emi(args.terms()),
        Commands::Eligibility(args) => CalculationRequest::Eligibility(EligibilityInput {
            gross_monthly_income: args.income,
            foir_percent: args.foir,
            existing_monthly_emis: args.existing_emis,
            annual_rate_percent: args.rate,
            tenure_months: args.tenure_months,
        }),
        Commands::Moratorium(args) => CalculationRequest::Moratorium(MoratoriumInput {
            principal: args.loan.principal,
            annual_rate_percent: args.loan.rate,
            tenure_months: args.loan.tenure_months,
            moratorium_months: args.moratorium_months,
            policy: if args.fixed_tenure {
                MoratoriumPolicy::FixedTenure
            } else {
                MoratoriumPolicy::FixedEmi
            },
        }),
        Commands::Prepayment(args) => {
            let prepayment = match (args.amount, args.fraction) {
                (Some(amount), _) => Prepayment::Amount(amount),
                (None, Some(fraction)) => Prepayment::Fraction(fraction),
                (None, None) => return Err(anyhow!("either --amount or --fraction is required")),
            };
            CalculationRequest::Prepayment(PrepaymentInput {
                outstanding_principal: args.outstanding,
                current_annual_rate_percent: args.rate,
                current_emi: args.emi,
                prepayment,
            })
        }
        Commands::RateChange(args) => CalculationRequest::RateChange(RateChangeInput {
            outstanding_principal: args.outstanding,
            current_annual_rate_percent: args.rate,
            current_emi: args.emi,
            revised_annual_rate_percent: args.revised_rate,
        }),
        Commands::Sip(args) => CalculationRequest::Sip(SipInput {
            monthly_investment: args.monthly,
            annual_return_rate_percent: args.rate,
            period_months: args.months,
        }),
        Commands::Lumpsum(args) => CalculationRequest::Lumpsum(LumpsumInput {
            amount: args.amount,
            annual_return_rate_percent: args.rate,
            period_months: args.months,
        }),
        Commands::Swp(args) => CalculationRequest::Swp(SwpInput {
            initial_corpus: args.corpus,
            monthly_withdrawal: args.withdrawal,
            annual_return_rate_percent: args.rate,
            period_months: args.months,
        }),
        Commands::Discount(args) => CalculationRequest::Discount(DiscountInput {
            amount: args.amount,
            discount_percent: args.discount,
            tax_percent: args.tax,
            tax_timing: if args.tax_before_discount {
                TaxTiming::BeforeDiscount
            } else {
                TaxTiming::AfterDiscount
            },
        }),
    };

    let runner = CalculationRunner::new(RunnerConfig::quick());
    let outcome = runner
        .run(&request)
        .with_context(|| format!("{} calculation failed", request.name()))?;

    print_json(&serde_json::to_value(&outcome)?, cli.compact)
}

fn print_json(value: &Value, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}

fn write_schedule(args: &ScheduleArgs) -> anyhow::Result<()> {
    let result = loan_scenario_engine::amortize(&args.loan.terms())?;
    info!(
        "schedule: emi={:.2} over {} months",
        result.emi, result.terms.tenure_months
    );

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    if args.yearly {
        for year in result.schedule().yearly() {
            writer.serialize(YearCsvRow {
                year: year.year,
                months: year.months,
                interest: year.interest,
                principal: year.principal_paid,
                outstanding: year.outstanding_after,
            })?;
        }
    } else {
        for row in result.schedule() {
            writer.serialize(ScheduleCsvRow {
                month: row.index,
                due_date: args.start_date.and_then(|start| row.due_date(start)),
                interest: row.interest,
                principal: row.principal_paid,
                payment: row.payment,
                outstanding: row.outstanding_after,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn run_json(args: &JsonArgs) -> anyhow::Result<Value> {
    let mut text = String::new();
    match &args.file {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("opening {}", path.display()))?
                .read_to_string(&mut text)?;
        }
        None => {
            io::stdin().read_to_string(&mut text)?;
        }
    }

    let config = if args.schedule {
        RunnerConfig::detailed()
    } else {
        RunnerConfig::from_env()
    };
    let runner = CalculationRunner::new(config);

    let input: Value = serde_json::from_str(&text).context("input is not valid JSON")?;
    if input.is_array() {
        let requests: Vec<CalculationRequest> = serde_json::from_value(input)?;
        let results = runner
            .run_batch(&requests)
            .into_iter()
            .map(|result| match result {
                Ok(outcome) => serde_json::to_value(outcome),
                Err(e) => Ok(json!({ "error": e, "message": e.to_string() })),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(results))
    } else {
        let request: CalculationRequest = serde_json::from_value(input)?;
        let outcome = runner.run(&request)?;
        Ok(serde_json::to_value(outcome)?)
    }
}
