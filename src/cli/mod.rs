use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    activity::GenericActivityChecker,
    config::{
        AuthScheme, CheckConfig, Config, GithubConfig, Strategy, DEFAULT_API_URL,
        DEFAULT_TIMEOUT_SECS,
    },
    ledger::{entities::MarkerWrite, DirectoryLedger},
    stats::SummaryStats,
    utils::{clock::DefaultClock, logging::enable_logging},
    workflow::{refresh_status, run_check, CheckOutcome},
};

#[derive(Parser, Debug)]
#[command(name = "wall-of-shame", version, long_about = None)]
#[command(about = "Records every day you didn't push code and keeps a README with the damage")]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        env = "SHAME_REPO_DIR",
        default_value = ".",
        global = true,
        help = "Directory holding the ledger and the report"
    )]
    dir: PathBuf,
    #[arg(
        long = "shame-dir",
        default_value = "shames",
        global = true,
        help = "Ledger directory, relative to --dir"
    )]
    shame_dir: PathBuf,
    #[arg(
        long,
        default_value = "README.md",
        global = true,
        help = "Report file, relative to --dir"
    )]
    readme: PathBuf,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long = "log-dir",
        global = true,
        help = "Also write logs into daily rotated files in this directory"
    )]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Check today's activity, record a shame if there was none and update README")]
    Check {
        #[command(flatten)]
        github: GithubArgs,
    },
    #[command(
        about = "Recompute statistics from the ledger and update the report without asking GitHub"
    )]
    Status {},
}

#[derive(clap::Args, Debug)]
struct GithubArgs {
    #[arg(long, env = "GITHUB_USERNAME", help = "GitHub account to check")]
    user: String,
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub token")]
    token: String,
    #[arg(
        long,
        env = "SHAME_STRATEGY",
        default_value_t = Strategy::Calendar,
        help = "Where to look for activity"
    )]
    strategy: Strategy,
    #[arg(
        long = "auth-scheme",
        env = "GITHUB_AUTH_SCHEME",
        default_value_t = AuthScheme::Bearer,
        help = "Scheme of the Authorization header"
    )]
    auth_scheme: AuthScheme,
    #[arg(
        long = "api-url",
        env = "GITHUB_API_URL",
        default_value = DEFAULT_API_URL,
        help = "GitHub API base url"
    )]
    api_url: String,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Request timeout in seconds")]
    timeout: u64,
}

impl GithubArgs {
    fn into_config(self) -> Result<CheckConfig> {
        Ok(CheckConfig {
            github: GithubConfig::new(
                &self.user,
                &self.token,
                self.auth_scheme,
                &self.api_url,
                self.timeout,
            )?,
            strategy: self.strategy,
        })
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(args.log_dir.as_deref(), logging_level, args.log)?;

    let config = Config::new(&args.dir, &args.shame_dir, &args.readme);
    let ledger = DirectoryLedger::new(config.ledger_dir.clone());

    match args.commands {
        Commands::Check { github } => {
            let check_config = github.into_config()?;
            let checker = GenericActivityChecker::new(&check_config)?;
            println!(
                "📅 Checking {} activity of {}",
                check_config.strategy, check_config.github.user
            );
            let outcome = run_check(&config, &checker, &ledger, &DefaultClock).await?;
            print_outcome(&outcome);
            Ok(())
        }
        Commands::Status {} => {
            let stats = refresh_status(&config, &ledger, &DefaultClock).await?;
            print_stats(&stats);
            Ok(())
        }
    }
}

fn print_outcome(outcome: &CheckOutcome) {
    match outcome.marker {
        None => println!("✅ Contribution found. No shame today."),
        Some(MarkerWrite::Created) => println!("❌ No contribution found today. Shame incoming."),
        Some(MarkerWrite::Replaced) => {
            println!("❌ No contribution found today. Today's shame was already recorded.")
        }
    }
    print_stats(&outcome.stats);
}

fn print_stats(stats: &SummaryStats) {
    println!("😔 Total shameful days: {}", stats.total);
    println!("🗓️ Last shame: {}", stats.last_shame);
    println!("🔥 Current discipline streak: {}", stats.streak);
}
