//! Debt Planner CLI
//!
//! Command-line interface for generating repayment schedules and investment projections

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use debt_planner::account::load_accounts;
use debt_planner::format::{format_currency, format_percentage};
use debt_planner::investment::{horizon_years, InvestmentConfig, InvestmentProjector};
use debt_planner::profile::InMemoryProfiles;
use debt_planner::schedule::{write_schedule_csv, DEFAULT_MAX_MONTHS};
use debt_planner::store::JsonScheduleStore;
use debt_planner::{
    compare_strategies, order_accounts, FloatPolicy, Planner, ScheduleConfig, ScheduleEngine,
    Strategy,
};

#[derive(Parser)]
#[command(name = "debt_planner", version, about = "Debt repayment and investment planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a repayment schedule from an accounts CSV
    Schedule(ScheduleArgs),
    /// Compare every ordering strategy on the same accounts
    Compare(PaymentArgs),
    /// Project growth of a monthly investment
    Invest(InvestArgs),
    /// Plan a stored user's schedule from a profiles JSON file
    Plan(PlanArgs),
}

#[derive(Args)]
struct PaymentArgs {
    /// Accounts CSV (id,creditor,balance,rate,payment,custom)
    #[arg(long)]
    accounts: PathBuf,

    /// Total monthly budget for debt payments
    #[arg(long)]
    payment: f64,

    /// Extra periodic payment
    #[arg(long, default_value_t = 0.0)]
    float: f64,

    /// Months between float payments
    #[arg(long, default_value_t = 1)]
    frequency: u32,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Give up after this many months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,
}

impl PaymentArgs {
    fn config(&self) -> ScheduleConfig {
        ScheduleConfig {
            monthly_payment: self.payment,
            float: FloatPolicy::new(self.float, self.frequency),
            start_date: self.start,
            max_months: self.max_months,
        }
    }
}

#[derive(Args)]
struct ScheduleArgs {
    #[command(flatten)]
    payment: PaymentArgs,

    /// snowball, avalanche, customAsc, or customDesc; keeps file order if omitted
    #[arg(long)]
    strategy: Option<String>,

    /// Write the monthly ledger as CSV
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the full schedule as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct InvestArgs {
    /// Years to project
    #[arg(long, conflicts_with_all = ["current_age", "retirement_age"])]
    years: Option<u32>,

    #[arg(long, requires = "retirement_age")]
    current_age: Option<u32>,

    #[arg(long, requires = "current_age")]
    retirement_age: Option<u32>,

    /// Annual rate as a decimal (0.04 = 4%)
    #[arg(long)]
    rate: f64,

    /// Monthly contribution
    #[arg(long)]
    contribution: f64,

    #[arg(long, default_value_t = 0.0)]
    float: f64,

    #[arg(long, default_value_t = 1)]
    frequency: u32,
}

#[derive(Args)]
struct PlanArgs {
    /// JSON file of { user id: { profile, accounts } }
    #[arg(long)]
    profiles: PathBuf,

    #[arg(long)]
    user: String,

    /// Directory where schedules are saved
    #[arg(long, default_value = "schedules")]
    store: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Schedule(args) => run_schedule(args),
        Command::Compare(args) => run_compare(args),
        Command::Invest(args) => run_invest(args),
        Command::Plan(args) => run_plan(args),
    }
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let accounts = load_accounts(&args.payment.accounts)
        .with_context(|| format!("loading {}", args.payment.accounts.display()))?;
    let strategy = args.strategy.as_deref().map(str::parse::<Strategy>).transpose()?;
    let accounts = order_accounts(accounts, strategy);

    let schedule = ScheduleEngine::new(args.payment.config()).compute(&accounts)?;

    println!("Repayment Schedule ({})", strategy.map(|s| s.label()).unwrap_or("file order"));
    println!("======================\n");
    println!("{:>7} {:>14}  {}", "Month", "Total", "Payments");
    println!("{}", "-".repeat(72));

    for month in &schedule.payments {
        let detail: Vec<String> = month
            .payments
            .iter()
            .zip(&accounts)
            .filter(|(p, _)| p.amount > 0.0)
            .map(|(p, a)| format!("{} {}", a.creditor, format_currency(p.amount)))
            .collect();
        println!(
            "{:>7} {:>14}  {}",
            month.month,
            format_currency(month.total()),
            detail.join(", ")
        );
    }

    print_summary(&schedule);

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_schedule_csv(&schedule, &accounts, file)?;
        println!("\nLedger written to: {}", path.display());
    }
    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &schedule)?;
        println!("Schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_compare(args: PaymentArgs) -> Result<()> {
    let accounts = load_accounts(&args.accounts)
        .with_context(|| format!("loading {}", args.accounts.display()))?;
    let results = compare_strategies(&accounts, &args.config());

    println!("{:<22} {:>8} {:>16} {:>16}", "Strategy", "Months", "Interest", "Total");
    println!("{}", "-".repeat(65));
    for (strategy, result) in results {
        match result {
            Ok(schedule) => println!(
                "{:<22} {:>8} {:>16} {:>16}",
                strategy.label(),
                schedule.months_to_finish,
                format_currency(schedule.interest),
                format_currency(schedule.total),
            ),
            Err(e) => println!("{:<22} {}", strategy.label(), e),
        }
    }
    Ok(())
}

fn run_invest(args: InvestArgs) -> Result<()> {
    let years = match (args.years, args.current_age, args.retirement_age) {
        (Some(years), _, _) => years,
        (None, Some(current), Some(retire)) => horizon_years(current, retire),
        _ => bail!("pass --years or both --current-age and --retirement-age"),
    };

    let projection = InvestmentProjector::new(InvestmentConfig {
        years,
        annual_rate: args.rate,
        monthly_contribution: args.contribution,
        float: FloatPolicy::new(args.float, args.frequency),
    })
    .project()?;

    println!("Investment Projection: {} years at {}", years, format_percentage(args.rate));
    println!(
        "{:>5} {:>16} {:>14} {:>16} {:>18}",
        "Year", "Principal", "Interest", "Added", "Value"
    );
    println!("{}", "-".repeat(73));
    for (i, year) in projection.years.iter().enumerate() {
        println!(
            "{:>5} {:>16} {:>14} {:>16} {:>18}",
            i + 1,
            format_currency(year.principal),
            format_currency(year.interest),
            format_currency(year.total_added),
            format_currency(year.total_value),
        );
    }

    println!("\nSummary:");
    println!("  Principal: {}", format_currency(projection.summary.principal));
    println!("  Interest:  {}", format_currency(projection.summary.interest));
    println!("  Value:     {}", format_currency(projection.summary.value));
    Ok(())
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let profiles = InMemoryProfiles::from_json_path(&args.profiles)
        .with_context(|| format!("loading {}", args.profiles.display()))?;
    let store = JsonScheduleStore::new(&args.store)?;

    let planner = Planner::new(profiles, store);
    let schedule = planner.plan(&args.user)?;

    print_summary(&schedule);
    println!("\nSchedule saved for {} in {}", args.user, args.store.display());
    Ok(())
}

fn print_summary(schedule: &debt_planner::Schedule) {
    println!("\nSummary:");
    println!("  Months to finish: {}", schedule.months_to_finish);
    println!("  Debt:     {}", format_currency(schedule.debt));
    println!("  Interest: {}", format_currency(schedule.interest));
    println!("  Total:    {}", format_currency(schedule.total));
}
