use clap::{Parser, Subcommand};
use remora_planner::{config::FetchConfig, exec, plan::FetchPlan};
use std::path::PathBuf;
use std::process::exit;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "remora-planner",
    about = "Fan data availability segments out into sandboxed condor fetch jobs"
)]
struct Cli {
    /// path to the yaml planner config
    #[arg(long, short)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// build the branch map and write one submit description per branch
    Plan,
    /// print the availability query command that produces the segment table
    Query,
    /// execute a single branch of the plan in process
    Run {
        #[arg(long)]
        branch: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match FetchConfig::load(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            error!("Failed to load planner config: {error}");
            exit(1)
        }
    };

    let plan = match FetchPlan::new(config) {
        Ok(plan) => plan,
        Err(error) => {
            error!("Failed to build plan: {error}");
            exit(1)
        }
    };

    match cli.command {
        Commands::Plan => {
            let segments = match plan.load_segments() {
                Ok(segments) => segments,
                Err(error) => {
                    error!("Failed to load segments: {error}");
                    exit(1)
                }
            };

            if segments.is_empty() {
                warn!(
                    "No availability segments in {:?}, nothing to plan",
                    plan.segments_file()
                );
                return;
            }

            let jobs = plan.plan(&segments);
            match plan.write_submit_files(&jobs) {
                Ok(written) => info!("Planned {} jobs", written.len()),
                Err(error) => {
                    error!("Failed to write submit files: {error}");
                    exit(1)
                }
            }
        }
        Commands::Query => {
            println!("{}", plan.query_command().join(" "));
        }
        Commands::Run { branch } => {
            let segments = match plan.load_segments() {
                Ok(segments) => segments,
                Err(error) => {
                    error!("Failed to load segments: {error}");
                    exit(1)
                }
            };
            let jobs = plan.plan(&segments);

            let Some(job) = jobs.iter().find(|job| job.branch == branch) else {
                error!("Branch {branch} is not part of the plan ({} branches)", jobs.len());
                exit(1)
            };

            match exec::run_command(&job.command) {
                Ok(stdout) => print!("{stdout}"),
                Err(error) => {
                    error!("{error}");
                    exit(1)
                }
            }
        }
    }
}
