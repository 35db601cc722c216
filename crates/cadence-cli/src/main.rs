mod cmd;
mod output;
mod root;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::promise::PromiseSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cadence",
    about = "Relationship outreach planner — rank pending actions and build an achievable daily plan",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .cadence/ or .git/)
    #[arg(long, global = true, env = "CADENCE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a cadence workspace in the current project
    Init {
        /// Seed the snapshot with sample relationships and actions
        #[arg(long)]
        sample: bool,
    },

    /// Build the daily plan for a date
    Plan {
        /// Plan date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free minutes available that day, from your calendar
        #[arg(long)]
        free_minutes: Option<u32>,

        /// Pin the capacity tier (micro, light, standard, heavy)
        #[arg(long = "override", value_name = "TIER")]
        override_tier: Option<cadence_core::types::CapacityTier>,

        /// Why the override applies
        #[arg(long, requires = "override_tier")]
        reason: Option<String>,

        /// Persist the plan, replacing any saved plan for that date
        #[arg(long)]
        save: bool,
    },

    /// Mark a saved plan completed (feeds adaptive recovery)
    PlanDone {
        /// Plan date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show every open action's lane and ranking score
    Lanes,

    /// Show the single best next action
    Next,

    /// Show stalled conversations that deserve a channel change
    Nudges,

    /// Promise deadlines and their status
    Promise {
        #[command(subcommand)]
        subcommand: PromiseSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { sample } => cmd::init::run(&root, sample),
        Commands::Plan {
            date,
            free_minutes,
            override_tier,
            reason,
            save,
        } => cmd::plan::run(
            &root,
            cmd::plan::PlanArgs {
                date,
                free_minutes,
                override_tier,
                reason,
                save,
            },
            cli.json,
        ),
        Commands::PlanDone { date } => cmd::plan::run_done(&root, date),
        Commands::Lanes => cmd::lanes::run(&root, cli.json),
        Commands::Next => cmd::next::run(&root, cli.json),
        Commands::Nudges => cmd::nudges::run(&root, cli.json),
        Commands::Promise { subcommand } => cmd::promise::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
