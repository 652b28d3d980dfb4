//! CLI for repo-fleet.
//!
//! `rollout` adds a workflow file to every matching repository of an
//! organization through pull requests. `branch` creates one branch across a
//! fleet of repositories picked from a catalog.

use clap::{Args, Parser, Subcommand};
use repo_fleet::{
    BranchRunOutcome, BranchRunSummary, BranchRunner, FleetCatalog, GitCli, OctocrabApi,
    PlanPresets, RolloutConfig, RolloutRunner, RolloutSummary, RunnerError, TerminalPrompter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Repo Fleet - bulk automation for GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a pull request adding a workflow file to every matching repository.
    Rollout(RolloutArgs),

    /// Create a branch in every repository of a fleet environment.
    Branch(BranchArgs),
}

#[derive(Args, Debug)]
struct RolloutArgs {
    /// Path to the rollout configuration file (built-in defaults if omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization to scan.
    #[arg(long)]
    organization: Option<String>,

    /// Local file committed into each repository.
    #[arg(long)]
    workflow_file: Option<PathBuf>,

    /// File receiving the URLs of created pull requests.
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// List target repositories without cloning, pushing or opening PRs.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct BranchArgs {
    /// Path to a fleet catalog (built-in catalog if omitted).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Environment name, skipping the selection menu.
    #[arg(long)]
    environment: Option<String>,

    /// Branch to create, skipping the prompt.
    #[arg(long)]
    branch: Option<String>,

    /// Base branch, skipping the prompt.
    #[arg(long)]
    base: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Rollout(args) => match rollout(cli.token, args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Critical failure");
                ExitCode::FAILURE
            }
        },
        Command::Branch(args) => match branch(cli.token, args).await {
            Ok(BranchRunOutcome::Cancelled) => {
                println!("Operation cancelled.");
                ExitCode::SUCCESS
            }
            Ok(BranchRunOutcome::Completed(summary)) => {
                if summary.all_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                error!(error = %e, "Critical failure");
                ExitCode::FAILURE
            }
        },
    }
}

/// Installs a compact subscriber filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Runs the rollout and prints its summary.
///
/// Per-repository failures are reported but do not fail the command.
async fn rollout(token: String, args: RolloutArgs) -> Result<(), RunnerError> {
    let mut config = match &args.config {
        Some(path) => RolloutConfig::load(path)?,
        None => RolloutConfig::default(),
    };
    if let Some(organization) = args.organization {
        config.organization = organization;
    }
    if let Some(workflow_file) = args.workflow_file {
        config.workflow_file = workflow_file;
    }
    if let Some(output_file) = args.output_file {
        config.output_file = output_file;
    }
    config.validate("command line")?;

    let api = OctocrabApi::new(token, config.api_base_url()?)?;
    let runner = RolloutRunner::new(config, Arc::new(api), Arc::new(GitCli::new()))
        .with_dry_run(args.dry_run);
    let summary = runner.run().await?;
    print_rollout_summary(runner.config(), &summary);
    Ok(())
}

async fn branch(token: String, args: BranchArgs) -> Result<BranchRunOutcome, RunnerError> {
    let catalog = match &args.catalog {
        Some(path) => FleetCatalog::load(path)?,
        None => FleetCatalog::builtin()?,
    };
    let api = OctocrabApi::new(token, catalog.api_base_url()?)?;
    let presets = PlanPresets {
        environment: args.environment,
        branch: args.branch,
        base: args.base,
        assume_yes: args.yes,
    };

    let runner = BranchRunner::new(catalog, Arc::new(api));
    let mut prompter = TerminalPrompter::new();
    let outcome = runner.run(&mut prompter, &presets).await?;
    if let BranchRunOutcome::Completed(summary) = &outcome {
        print_branch_summary(&runner.catalog().owner, summary);
    }
    Ok(outcome)
}

fn print_rollout_summary(config: &RolloutConfig, summary: &RolloutSummary) {
    println!("\nSummary for {}:", config.organization);
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Repositories listed: {}", summary.repositories_listed);
    println!("  Repositories matched: {}", summary.repositories_matched);
    if summary.listing_interrupted {
        println!("  Listing interrupted: results are partial");
    }

    if !summary.dry_run {
        println!("  Branches published: {}", summary.branches_published);
        println!("  Publish failures: {}", summary.publish_failed);
        println!("  PRs created: {}", summary.prs_created);
        println!("  PRs failed: {}", summary.prs_failed);
        println!(
            "  Reviewer requests failed: {}",
            summary.reviewer_requests_failed
        );
        println!("  URLs not recorded: {}", summary.urls_not_recorded);
        println!("  PR URLs file: {}", config.output_file.display());
    }

    if summary.has_failures() {
        println!("\nCompleted with failures; see the log above.");
    }
}

fn print_branch_summary(owner: &str, summary: &BranchRunSummary) {
    println!("\nSummary for {owner} / {}:", summary.environment);
    println!("  Created: {}", summary.created);
    println!("  Already existed: {}", summary.already_existed);
    println!("  Failed: {}", summary.failed);

    if summary.all_success() {
        println!("\nBranch creation completed successfully for all repositories.");
    } else {
        println!("\nBranch creation failed for:");
        for repository in &summary.failed_repositories {
            println!("  - {repository}");
        }
    }
}
