//! gitscribe - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Select};
use tracing_subscriber::EnvFilter;

use gitscribe::commit::{Analysis, DiffAnalyzer, MessageGenerator, validate_message};
use gitscribe::config::{Config, load_config};
use gitscribe::format::{format_file_list, format_stats, pluralize};
use gitscribe::git::repo::RepoInfo;
use gitscribe::git::{SystemGit, check_git_installed, commit_with_message, git_root, is_git_repo};
use gitscribe::tables::Tables;

/// Write conventional commit messages from staged changes.
#[derive(Parser, Debug)]
#[command(name = "gitscribe")]
#[command(about = "Write conventional commit messages from staged changes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a YAML config file (overrides GITSCRIBE_CONFIG and .gitscribe.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message for the staged changes (default)
    Generate(GenerateArgs),

    /// Print several alternative commit subjects
    Suggest {
        /// Maximum number of suggestions
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,

        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Check a commit message against conventional commit rules
    Validate {
        /// The message to check
        message: String,
    },

    /// Print the raw analysis of the staged changes as JSON
    Analyze,

    /// Show repository information
    Info {
        /// Number of recent commits to show
        #[arg(short = 'n', long, default_value_t = 5)]
        commits: usize,
    },

    /// List conventional commit types
    Types,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Subject line only
    #[arg(long)]
    no_body: bool,

    #[command(flatten)]
    commit: CommitArgs,
}

#[derive(Args, Debug, Default)]
struct CommitArgs {
    /// Create the commit with the generated message
    #[arg(long)]
    commit: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, requires = "commit")]
    yes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runner = SystemGit::new();
    let command = cli.command.unwrap_or(Command::Generate(GenerateArgs::default()));

    match command {
        Command::Validate { message } => {
            let config = load(&cli.config, &runner)?;
            run_validate(&message, &config)
        }
        Command::Types => {
            let config = load(&cli.config, &runner)?;
            for (commit_type, description) in config.describe_types() {
                println!("  {:<10}{}", commit_type, description);
            }
            Ok(())
        }
        Command::Info { commits } => {
            require_repo(&runner)?;
            print_info(&RepoInfo::collect(&runner, commits)?);
            Ok(())
        }
        Command::Analyze => {
            require_repo(&runner)?;
            let analysis = DiffAnalyzer::new(Tables::standard(), runner).analyze_changes();
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }
        Command::Generate(args) => {
            require_repo(&runner)?;
            let config = load(&cli.config, &runner)?;
            let Some(analysis) = analyze_staged(&runner) else {
                return Ok(());
            };

            let generator = MessageGenerator::new(Tables::standard(), config.message_rules);
            let message = generator.generate_full_message(&analysis, !args.no_body);
            println!("{message}");

            if args.commit.commit {
                confirm_and_commit(&runner, &message, args.commit.yes)?;
            }
            Ok(())
        }
        Command::Suggest { count, commit } => {
            require_repo(&runner)?;
            let config = load(&cli.config, &runner)?;
            let Some(analysis) = analyze_staged(&runner) else {
                return Ok(());
            };

            let generator = MessageGenerator::new(Tables::standard(), config.message_rules);
            let suggestions = generator.suggest_multiple_messages(&analysis, count);
            if suggestions.is_empty() {
                return Ok(());
            }

            if !commit.commit {
                for (i, suggestion) in suggestions.iter().enumerate() {
                    println!("{}. {}", i + 1, suggestion);
                }
                return Ok(());
            }

            let chosen = if commit.yes {
                0
            } else {
                Select::new()
                    .with_prompt("Commit message")
                    .items(&suggestions)
                    .default(0)
                    .interact()
                    .context("Selection cancelled")?
            };
            commit_with_message(&runner, &suggestions[chosen]).context("Failed to create commit")?;
            println!("✓ Committed: {}", suggestions[chosen]);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Fail early when git is missing or the working directory is not a repository.
fn require_repo(runner: &SystemGit) -> Result<()> {
    check_git_installed().context("git is required")?;
    if !is_git_repo(runner) {
        bail!("Not a git repository. Run gitscribe from within a git repository.");
    }
    Ok(())
}

fn load(explicit: &Option<PathBuf>, runner: &SystemGit) -> Result<Config> {
    let root = git_root(runner).ok();
    load_config(explicit.as_deref(), root.as_deref()).context("Failed to load configuration")
}

/// Analyze the staged changes, printing a summary to stderr.
/// Returns `None` when there is nothing to describe.
fn analyze_staged(runner: &SystemGit) -> Option<Analysis> {
    let analysis = DiffAnalyzer::new(Tables::standard(), runner.clone()).analyze_changes();

    if nothing_staged(&analysis) {
        eprintln!("No staged changes found. Stage files with `git add` first.");
        return None;
    }

    let files = analysis.status.all_files();
    eprintln!(
        "Analyzing {} changed {} ({}): {}",
        files.len(),
        pluralize("file", files.len()),
        format_stats(analysis.stats.insertions, analysis.stats.deletions),
        format_file_list(&files, 5)
    );

    Some(analysis)
}

/// Unstaged edits still appear in the status lists, so the staged line
/// counts decide whether there is anything to commit.
fn nothing_staged(analysis: &Analysis) -> bool {
    analysis.status.is_empty() || analysis.stats.files_changed == 0
}

fn run_validate(message: &str, config: &Config) -> Result<()> {
    let report = validate_message(message, &config.message_rules);

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    if report.is_valid() {
        println!("✓ Valid conventional commit message");
        return Ok(());
    }

    for error in &report.errors {
        eprintln!("  - {error}");
    }
    bail!(
        "Commit message has {} {}",
        report.errors.len(),
        pluralize("problem", report.errors.len())
    );
}

fn confirm_and_commit(runner: &SystemGit, message: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Commit with this message?")
            .default(true)
            .interact()
            .context("Confirmation cancelled")?;
        if !confirmed {
            println!("Aborted. Nothing committed.");
            return Ok(());
        }
    }

    commit_with_message(runner, message).context("Failed to create commit")?;
    println!("✓ Committed");
    Ok(())
}

fn print_info(info: &RepoInfo) {
    println!("Repository:   {}", info.root.display());
    println!("Branch:       {}", info.branch);
    println!("Project type: {}", info.project_type.unwrap_or("unknown"));

    if info.remotes.is_empty() {
        println!("Remotes:      none");
    } else {
        println!("Remotes:");
        for (name, url) in &info.remotes {
            println!("  {name:<10}{url}");
        }
    }

    println!("Ignore rules: {}", info.ignore_patterns.len());

    if !info.recent_commits.is_empty() {
        println!("\nRecent commits:");
        for commit in &info.recent_commits {
            println!("  {} - {} ({}, {})", commit.hash, commit.subject, commit.author, commit.date);
        }
    }
}
