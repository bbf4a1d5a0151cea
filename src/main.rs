use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use u_cpu_sched::dispatching::PolicyKind;
use u_cpu_sched::models::{Job, Ticks, Timeline};
use u_cpu_sched::persistence::{load_jobs_auto, save_jobs};
use u_cpu_sched::simulator::{
    render_job_table, render_timeline_log, ConfigOverrides, ExecutionMode, GanttChart,
    SimulationConfig, SimulationKpi, Simulator,
};
use u_cpu_sched::validation::validate_jobs;
use u_cpu_sched::workload::WorkloadGenerator;

#[derive(Parser)]
#[command(name = "u-cpu-sched", version)]
#[command(about = "Discrete-time CPU scheduling simulator", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a job list and print statistics and a Gantt chart
    Run(RunArgs),
    /// Write a random job list as CSV
    Generate(GenerateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Job list (.csv, or .json for an array of job records)
    #[arg(long, env = "U_CPU_SCHED_JOBS")]
    jobs: PathBuf,
    /// JSON simulation config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// fcfs, sjf, rr or priority
    #[arg(long)]
    policy: Option<PolicyKind>,
    /// Round-robin time quantum
    #[arg(long)]
    quantum: Option<Ticks>,
    #[arg(long)]
    aging_threshold: Option<Ticks>,
    #[arg(long)]
    aging_increment: Option<u32>,
    /// unit-step or honor-slices
    #[arg(long)]
    execution: Option<ExecutionMode>,
    /// Shorthand for `--execution honor-slices`
    #[arg(long, default_value_t = false, conflicts_with = "execution")]
    honor_slices: bool,
    /// Stop the clock at this tick even if jobs remain
    #[arg(long)]
    max_time: Option<Ticks>,
    /// Print the results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Also print the per-tick execution log
    #[arg(long, default_value_t = false)]
    log: bool,
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            policy: self.policy,
            time_quantum: self.quantum,
            aging_threshold: self.aging_threshold,
            aging_increment: self.aging_increment,
            execution: self
                .execution
                .or(self.honor_slices.then_some(ExecutionMode::HonorSlices)),
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Output CSV path
    #[arg(long)]
    out: PathBuf,
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    ticks: Option<Ticks>,
    #[arg(long)]
    p_arrival: Option<f64>,
    #[arg(long)]
    p_short: Option<f64>,
    #[arg(long)]
    short_burst: Option<Ticks>,
    #[arg(long)]
    long_burst: Option<Ticks>,
    #[arg(long)]
    max_priority: Option<u32>,
}

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a SimulationConfig,
    kpi: &'a SimulationKpi,
    finished: &'a [Job],
    unfinished: usize,
    timeline: &'a Timeline,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err.to_string()))
}

fn load_config(args: &RunArgs) -> Result<SimulationConfig> {
    let base = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    let config = base.apply_overrides(&args.overrides());
    config.validate()?;
    Ok(config)
}

fn run(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let jobs = load_jobs_auto(&args.jobs)
        .with_context(|| format!("loading jobs from {}", args.jobs.display()))?;
    validate_jobs(&jobs).map_err(u_cpu_sched::Error::from)?;

    let mut sim = Simulator::new(config.clone())?;
    sim.submit_all(jobs)?;

    let kpi = match args.max_time {
        Some(limit) => sim.run_until(limit),
        None => sim.run(),
    };

    if args.json {
        let report = RunReport {
            config: &config,
            kpi: &kpi,
            finished: sim.finished(),
            unfinished: sim.unfinished(),
            timeline: sim.timeline(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Policy: {}", config.policy.label());
    println!();
    print!("{}", render_job_table(sim.finished()));
    println!();
    println!("{kpi}");
    println!();
    println!("Gantt Chart:");
    println!("{}", GanttChart::new(sim.timeline()).with_labels(sim.finished()));
    if args.log {
        println!();
        println!("Execution Log:");
        print!("{}", render_timeline_log(sim.timeline()));
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let defaults = WorkloadGenerator::default();
    let generator = WorkloadGenerator {
        ticks: args.ticks.unwrap_or(defaults.ticks),
        p_arrival: args.p_arrival.unwrap_or(defaults.p_arrival),
        p_short: args.p_short.unwrap_or(defaults.p_short),
        short_burst: args.short_burst.unwrap_or(defaults.short_burst),
        long_burst: args.long_burst.unwrap_or(defaults.long_burst),
        max_priority: args.max_priority.unwrap_or(defaults.max_priority),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let jobs = generator.generate_seeded(seed)?;
    save_jobs(&args.out, &jobs)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!(seed, count = jobs.len(), path = %args.out.display(), "workload written");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Generate(args) => generate(args),
    }
}
