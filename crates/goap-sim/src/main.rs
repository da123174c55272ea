//! goap-sim - GOAP catalog tooling and headless ecosystem simulation.
//!
//! - `goap-sim check` - validate a simulation file's catalog
//! - `goap-sim plan` - plan once from a given fact set
//! - `goap-sim simulate` - run herbivores through the full agent loop
//! - `goap-sim init` - write a default simulation file

mod config;
mod drives;
mod fact;
mod sim;
mod world;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use goap::core::{FactSet, Goal, GoalSet};
use goap::planner::{Planner, PlannerConfig};

use crate::config::{SimConfig, DEFAULT_CONFIG};
use crate::fact::Fact;
use crate::sim::Simulation;

const DEFAULT_SIM_FILE: &str = "sim.yaml";

#[derive(Parser)]
#[command(name = "goap-sim")]
#[command(about = "GOAP planning and ecosystem simulation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the catalog in a simulation file
    Check {
        #[arg(default_value = DEFAULT_SIM_FILE)]
        config: PathBuf,
    },

    /// Plan once and print the chosen actions
    Plan {
        #[arg(default_value = DEFAULT_SIM_FILE)]
        config: PathBuf,

        /// Starting facts
        #[arg(long, value_enum, value_delimiter = ',')]
        facts: Vec<Fact>,

        /// Plan for this goal only, instead of selecting among the catalog goals
        #[arg(long, value_enum)]
        goal: Option<Fact>,
    },

    /// Run the ecosystem simulation
    Simulate {
        #[arg(default_value = DEFAULT_SIM_FILE)]
        config: PathBuf,

        /// Ticks to run (defaults to the file's `ticks`)
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the file's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Status readout interval in ticks (0 disables it)
        #[arg(long)]
        report_every: Option<u64>,

        /// Write every herbivore's trace events to this JSON file
        #[arg(long)]
        trace_out: Option<PathBuf>,
    },

    /// Write a default simulation file
    Init {
        #[arg(default_value = DEFAULT_SIM_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    if cli.json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    match cli.command {
        Commands::Check { config } => check(&config),
        Commands::Plan {
            config,
            facts,
            goal,
        } => plan(&config, facts, goal),
        Commands::Simulate {
            config,
            ticks,
            seed,
            report_every,
            trace_out,
        } => simulate(&config, ticks, seed, report_every, trace_out.as_deref()),
        Commands::Init { path, force } => init(&path, force),
    }
}

fn check(path: &Path) -> Result<()> {
    let config = SimConfig::load(path)?;
    let catalog = config.build_catalog()?;

    println!("{}: catalog OK", path.display());
    println!("  actions: {}", catalog.actions().len());
    for action in catalog.actions() {
        let target = action.target_tag().unwrap_or("-");
        println!(
            "    {:<12} cost={:<5} duration={:<5} target={}",
            action.name, action.cost, action.duration, target
        );
    }
    println!("  goals: {}", catalog.goals().len());
    for goal in catalog.goals() {
        let removable = if goal.removable { " (removable)" } else { "" };
        println!("    {} priority={}{}", goal.target, goal.priority, removable);
    }
    println!(
        "  world: {}x{} cells, {} herbivores",
        config.world.width,
        config.world.depth,
        config.world.herbivores.len()
    );
    Ok(())
}

fn plan(path: &Path, facts: Vec<Fact>, goal: Option<Fact>) -> Result<()> {
    let config = SimConfig::load(path)?;
    let catalog = config.build_catalog()?;
    let planner = Planner::new().with_config(PlannerConfig::from(&config.planner));
    let facts: FactSet<Fact> = facts.into_iter().collect();

    let goals: GoalSet<Fact> = match goal {
        Some(target) => [Goal::new(target, 0)].into_iter().collect(),
        None => catalog.goals().iter().copied().collect(),
    };

    let selection = planner.select_with(&facts, catalog.actions(), &goals, |_, goal, result| {
        match result {
            Ok(plan) => tracing::debug!(goal = %goal.target, steps = plan.len(), "planned"),
            Err(err) => tracing::debug!(goal = %goal.target, %err, "no plan"),
        }
    });

    let Some(selection) = selection else {
        println!("No plan: no unsatisfied goal is achievable from the given facts");
        return Ok(());
    };

    println!(
        "Goal: {} (priority {})",
        selection.goal.target, selection.goal.priority
    );
    println!("Cost: {}", selection.plan.cost);
    for (i, step) in selection.plan.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step.name);
    }
    Ok(())
}

fn simulate(
    path: &Path,
    ticks: Option<u64>,
    seed: Option<u64>,
    report_every: Option<u64>,
    trace_out: Option<&Path>,
) -> Result<()> {
    let mut config = SimConfig::load(path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let ticks = ticks.unwrap_or(config.ticks);
    let report_every = report_every.unwrap_or(config.report_every);
    let catalog = config.build_catalog()?;

    let mut sim = Simulation::new(&config, &catalog, trace_out.is_some())?;
    tracing::info!(
        herbivores = sim.agents().len(),
        ticks,
        seed = config.seed,
        "Starting simulation"
    );

    for _ in 0..ticks {
        sim.tick();
        if report_every > 0 && sim.tick_count() % report_every == 0 {
            print_status(&sim);
        }
        if sim.agents().is_empty() {
            tracing::info!(tick = sim.tick_count(), "All herbivores died, stopping");
            break;
        }
    }

    let summary = sim.summary();
    println!();
    println!("Simulation summary");
    println!("==================");
    println!("Ticks: {} ({:.1}s)", summary.ticks, summary.seconds);
    println!("Population: {} alive, {} died", summary.alive, summary.deaths);
    println!(
        "Drinks: {}  Meals: {}  Missed meals: {}",
        summary.drinks, summary.meals, summary.missed_meals
    );

    if let Some(out) = trace_out {
        let logs = sim.trace_logs();
        let json = serde_json::to_string_pretty(&logs).context("Failed to encode trace logs")?;
        std::fs::write(out, json)
            .with_context(|| format!("Failed to write traces to {}", out.display()))?;
        println!("Traces: {}", out.display());
    }
    Ok(())
}

fn print_status(sim: &Simulation) {
    let summary = sim.summary();
    let regrowing = sim
        .world()
        .sources()
        .iter()
        .filter(|s| s.regrowing.is_some())
        .count();
    println!(
        "[t={:>7.1}s] population {} (deaths {}), plants regrowing {}",
        summary.seconds, summary.alive, summary.deaths, regrowing
    );
    for line in sim.status() {
        println!("  {line}");
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote default simulation to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  goap-sim check {}", path.display());
    println!("  goap-sim simulate {}", path.display());
    Ok(())
}
