// Biographer - command line entry point

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use biographer::services::biographer::fix_up;
use biographer::{evaluate, ConfigService, TurnOrchestrator, TurnRequest};
use biographer_core::Profile;
use biographer_llm::{create_provider, LlmProvider, ScriptedProvider};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "biographer", about = "Conversational profile completion engine")]
struct Cli {
    /// Path to config JSON (defaults to ~/.biographer/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging, overriding RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one dialogue turn and print the response.
    Turn {
        /// TurnRequest JSON file, or "-" for stdin.
        #[arg(long)]
        request: String,

        /// Use the offline scripted provider; replies are fallback questions.
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration and check that the oracle answers.
    Check,

    /// Score two profiles against each other.
    Score {
        /// First profile JSON file.
        a: PathBuf,

        /// Second profile JSON file.
        b: PathBuf,
    },

    /// Look up the Pravara options for a Gothra.
    Pravara {
        /// Gothra name, matched case-insensitively.
        gothra: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("biographer=debug,biographer_knowledge=debug,biographer_llm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_service = match &cli.config {
        Some(path) => ConfigService::from_path(path),
        None => ConfigService::new(),
    }
    .context("loading configuration")?;

    match cli.command {
        Commands::Turn { request, dry_run } => {
            let raw = read_input(&request)?;
            let request: TurnRequest =
                serde_json::from_str(&raw).context("parsing turn request")?;

            let config = config_service.get_config_clone();
            let provider: Arc<dyn LlmProvider> = if dry_run {
                info!("Dry run, no oracle calls leave the process");
                Arc::new(ScriptedProvider::empty())
            } else {
                create_provider(config.provider.clone())?
            };
            let knowledge = Arc::new(config_service.knowledge_base()?);
            let orchestrator = TurnOrchestrator::new(&config, provider, knowledge);

            let today = chrono::Local::now().date_naive();
            let response = orchestrator.run_turn(&request, today).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Check => {
            let config = config_service.get_config_clone();
            config.validate().map_err(anyhow::Error::msg)?;
            let provider = create_provider(config.provider.clone())?;
            let knowledge = Arc::new(config_service.knowledge_base()?);
            TurnOrchestrator::new(&config, provider, knowledge)
                .check_oracle()
                .await
                .context("oracle health check")?;
            println!("ok");
        }
        Commands::Score { a, b } => {
            let me = read_profile(&a)?;
            let them = read_profile(&b)?;
            let outcome = evaluate(&me, &them);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Pravara { gothra } => {
            let knowledge = config_service.knowledge_base()?;
            let found = knowledge.lookup_gothra(&gothra)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    Ok(())
}

fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {}", source))
    }
}

/// Profiles are scored in their persisted shape, so run the fix-up pass first
fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut profile: Profile =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    fix_up(&mut profile);
    Ok(profile)
}
