mod config_commands;

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use {
    clap::{Parser, Subcommand},
    plugin_downloader_commands::{ChatCommand, CommandRegistry, CommandReply, RepoListCommand},
    plugin_downloader_repos::RepositoryRegistry,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "plugin-downloader",
    about = "List the plugins published in chat-bot plugin repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: discovered plugin-downloader.{toml,yaml,yml,json}).
    #[arg(long, global = true, env = "PLUGIN_DOWNLOADER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories, or the plugins of one repository.
    Repolist {
        /// Registered repository name.
        repository: Option<String>,
    },
    /// Run a chat command line as the bot would (e.g. `chat repolist ProgVal`).
    Chat {
        #[arg(required = true, trailing_var_arg = true)]
        line: Vec<String>,
    },
    /// Show the registered repositories with their location.
    Repos,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Replies go to stdout, error replies to stderr with a failing exit code.
fn print_reply(reply: &CommandReply) -> ExitCode {
    if reply.is_error() {
        eprintln!("{reply}");
        return ExitCode::FAILURE;
    }
    println!("{reply}");
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "plugin-downloader starting");

    let config = config_commands::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Repolist { repository } => {
            let command = RepoListCommand::new(Arc::new(RepositoryRegistry::from_config(&config)?));
            let args: Vec<&str> = repository.as_deref().into_iter().collect();
            Ok(print_reply(&command.execute(&args).await))
        },
        Commands::Chat { line } => {
            let registry = Arc::new(RepositoryRegistry::from_config(&config)?);
            let mut commands = CommandRegistry::new();
            commands.register(Box::new(RepoListCommand::new(registry)));
            Ok(print_reply(&commands.dispatch(&line.join(" ")).await))
        },
        Commands::Repos => {
            let registry = RepositoryRegistry::from_config(&config)?;
            print!("{}", config_commands::render_repositories(&registry));
            Ok(ExitCode::SUCCESS)
        },
        Commands::Config { action } => {
            config_commands::handle_config(action, cli.config.as_deref(), &config)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}
