//! Retirement Risk CLI
//!
//! Runs a bootstrap, stress, sequence-risk or LTC study and prints a JSON
//! report to stdout.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use retirement_risk::ltc::{
    summarize_ltc_simulations, LtcScenarioSet, LtcSimulationSummary, DEFAULT_MAX_AGE,
};
use retirement_risk::scenario::StressScenarioResult;
use retirement_risk::sequence::{summarize_sequence_risk, SequenceRiskSummary};
use retirement_risk::{Gender, LtcConfig, ScenarioRunner, Seed, WithdrawalPlan};

#[derive(Parser, Debug)]
#[command(name = "retirement_risk")]
#[command(about = "Monte Carlo retirement risk scenarios and long-term-care projections")]
struct Args {
    /// Directory holding returns.csv and crisis_periods.csv (default: built-in history)
    #[arg(long, global = true)]
    history_dir: Option<PathBuf>,

    /// JSON file with LTC assumptions; missing fields keep their defaults
    #[arg(long, global = true)]
    ltc_config: Option<PathBuf>,

    /// Integer or text seed
    #[arg(long, global = true, default_value = "42")]
    seed: String,

    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Correlated multi-asset bootstrap paths
    Bootstrap {
        #[arg(long, default_value_t = 10)]
        sequences: usize,
        #[arg(long, default_value_t = 30)]
        length: usize,
        /// Sample crisis-stratified equity paths instead
        #[arg(long)]
        stratified: bool,
    },
    /// Favorable, unfavorable, volatile and recovery paths
    Stress {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Bootstrap equity paths through a fixed withdrawal plan
    SequenceRisk {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, default_value_t = 1_000)]
        paths: usize,
    },
    /// LTC Monte Carlo over simulated lifetimes
    Ltc {
        #[command(flatten)]
        person: PersonArgs,
        #[arg(long, default_value_t = 10_000)]
        simulations: usize,
    },
    /// Base LTC projection, its stress variants and present value
    LtcScenarios {
        #[command(flatten)]
        person: PersonArgs,
        #[arg(long, default_value_t = 0.04)]
        discount_rate: f64,
    },
}

#[derive(clap::Args, Debug)]
struct PlanArgs {
    #[arg(long, default_value_t = 30)]
    years: usize,
    #[arg(long, default_value_t = 0.04)]
    withdrawal_rate: f64,
    #[arg(long, default_value_t = 1_000_000.0)]
    initial_value: f64,
}

impl From<&PlanArgs> for WithdrawalPlan {
    fn from(args: &PlanArgs) -> Self {
        Self {
            years: args.years,
            withdrawal_rate: args.withdrawal_rate,
            initial_value: args.initial_value,
        }
    }
}

#[derive(clap::Args, Debug)]
struct PersonArgs {
    #[arg(long, default_value_t = 65)]
    age: u8,
    /// male or female
    #[arg(long, default_value = "female")]
    gender: Gender,
    #[arg(long, default_value_t = DEFAULT_MAX_AGE)]
    max_age: u8,
}

#[derive(Serialize)]
struct Report<T: Serialize> {
    command: &'static str,
    generated_at: DateTime<Utc>,
    seed: Seed,
    execution_time_ms: u64,
    result: T,
}

#[derive(Serialize)]
struct SequenceRiskOutput {
    plan: WithdrawalPlan,
    summary: Option<SequenceRiskSummary>,
}

#[derive(Serialize)]
struct LtcOutput {
    simulations: usize,
    summary: Option<LtcSimulationSummary>,
}

#[derive(Serialize)]
struct LtcScenarioOutput {
    present_value: f64,
    discount_rate: f64,
    scenarios: LtcScenarioSet,
}

fn parse_seed(raw: &str) -> Seed {
    match raw.parse::<u64>() {
        Ok(value) => Seed::Int(value),
        Err(_) => Seed::Text(raw.to_string()),
    }
}

fn build_runner(args: &Args) -> Result<ScenarioRunner> {
    let mut runner = match &args.history_dir {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("loading history from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    if let Some(path) = &args.ltc_config {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading LTC config {}", path.display()))?;
        let config: LtcConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing LTC config {}", path.display()))?;
        runner.assumptions_mut().ltc = config;
    }

    Ok(runner)
}

fn emit<T: Serialize>(
    args: &Args,
    command: &'static str,
    seed: Seed,
    start: Instant,
    result: T,
) -> Result<()> {
    let report = Report {
        command,
        generated_at: Utc::now(),
        seed,
        execution_time_ms: start.elapsed().as_millis() as u64,
        result,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let runner = build_runner(&args)?;
    let seed = parse_seed(&args.seed);
    let start = Instant::now();

    match &args.command {
        Command::Bootstrap { sequences, length, stratified } => {
            if *stratified {
                let paths = runner.run_crisis_stratified(*sequences, *length, seed.clone())?;
                emit(&args, "bootstrap", seed, start, paths)
            } else {
                let paths = runner.run_multi_asset(*sequences, *length, seed.clone())?;
                emit(&args, "bootstrap", seed, start, paths)
            }
        }
        Command::Stress { plan } => {
            let results: Vec<StressScenarioResult> =
                runner.run_stress_scenarios(&WithdrawalPlan::from(plan))?;
            emit(&args, "stress", seed, start, results)
        }
        Command::SequenceRisk { plan, paths } => {
            let plan = WithdrawalPlan::from(plan);
            let results = runner.run_sequence_risk(&plan, *paths, seed.clone())?;
            let output = SequenceRiskOutput {
                summary: summarize_sequence_risk(&results),
                plan,
            };
            emit(&args, "sequence-risk", seed, start, output)
        }
        Command::Ltc { person, simulations } => {
            let results = runner.run_ltc(
                person.age,
                person.gender,
                person.max_age,
                *simulations,
                seed.clone(),
            )?;
            let output = LtcOutput {
                simulations: results.len(),
                summary: summarize_ltc_simulations(&results),
            };
            emit(&args, "ltc", seed, start, output)
        }
        Command::LtcScenarios { person, discount_rate } => {
            let scenarios = runner.run_ltc_scenarios(
                person.age,
                person.gender,
                person.max_age,
                seed.clone(),
            )?;
            let present_value = runner.ltc_present_value(
                person.age,
                person.gender,
                person.max_age,
                *discount_rate,
                seed.clone(),
            )?;
            let output = LtcScenarioOutput {
                present_value,
                discount_rate: *discount_rate,
                scenarios,
            };
            emit(&args, "ltc-scenarios", seed, start, output)
        }
    }
}
