use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use ghpr::utils::validators;
use ghpr::{Config, PrOverrides, Secrets, TaskContext};
use ghpr_http::ReqwestTransport;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "ghpr")]
#[command(about = "Create GitHub pull requests from a configurable task")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a pull request
    Create {
        /// Configuration file path (defaults to ghpr.yaml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Target repository as owner/name or a GitHub URL
        #[arg(long)]
        repo: Option<String>,

        /// Title for the pull request
        #[arg(long)]
        title: Option<String>,

        /// Body text for the pull request
        #[arg(long)]
        body: Option<String>,

        /// Branch containing the changes
        #[arg(long)]
        head: Option<String>,

        /// Branch to merge into
        #[arg(long)]
        base: Option<String>,

        /// Name of the secret holding the GitHub token
        #[arg(long)]
        token_secret: Option<String>,

        /// REST API base URL (for GitHub Enterprise)
        #[arg(long)]
        api_base: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            config,
            repo,
            title,
            body,
            head,
            base,
            token_secret,
            api_base,
            timeout,
        } => {
            validators::validate_title(&title)?;
            validators::validate_branch_name("head", &head)?;
            validators::validate_branch_name("base", &base)?;
            validators::validate_secret_name(&token_secret)?;
            validators::validate_api_base(&api_base)?;
            let repo = validators::validate_repo(&repo)?;

            let config = match config {
                Some(path) => Config::load(&path)?,
                None => ghpr::load_default_config()?,
            };

            let mut task = config.build_task();
            if let Some(token_secret) = token_secret {
                task = task.with_token_secret(token_secret);
            }
            if let Some(api_base) = api_base {
                task = task.with_api_base(api_base);
            }

            // Environment secrets take precedence over the config file
            let mut secrets = config.secrets().clone();
            secrets.extend(Secrets::from_env());
            let context = TaskContext::with_secrets(secrets);

            let transport = match config.transport_timeout(timeout) {
                Some(limit) => ReqwestTransport::with_timeout(limit)?,
                None => ReqwestTransport::new(),
            };

            let overrides = PrOverrides {
                repo,
                title,
                body,
                head,
                base,
            };

            let response = task.run(&transport, &context, &overrides).await?;
            let status = response.status();
            info!(status = status.as_u16(), url = %response.url(), "GitHub responded");

            let text = response
                .text()
                .await
                .context("Failed to read GitHub response body")?;

            if status.is_success() {
                println!("{} {}", "Pull request created:".green(), status);
                println!("{}", text);
            } else {
                eprintln!("{}", text);
                anyhow::bail!(
                    "GitHub API returned {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                );
            }
        }
    }

    Ok(())
}

/// Install the global tracing subscriber
///
/// Log filtering follows `RUST_LOG`, defaulting to warnings only.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
