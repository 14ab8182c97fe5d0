use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;

use solace_application::{RemoteServices, SessionCoordinator};
use solace_core::SolaceError;
use solace_core::collaborator::{Confirmation, FixedConfirmation};
use solace_core::config::{ClientConfig, DEFAULT_LOG_LEVEL};
use solace_infrastructure::{ConfigService, HttpRemoteClient};

use crate::console::{ConsoleNotifier, PromptConfirmation};

mod commands;
mod console;
mod display;
mod logging;
mod repl;

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Solace - chats, journal and persona settings for the assistant service", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the assistant service, overrides the configuration
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage chat conversations
    Chats {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Manage journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Show and change the assistant settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Delete all chats and journal entries
    Wipe {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Interactive chat
    Repl,
}

#[derive(Subcommand)]
enum ChatAction {
    /// List conversations, most recent first
    List,
    /// Show the messages of a conversation
    Show { id: String },
    /// Send a message and print the reply
    Send {
        text: String,
        /// Conversation to send to (a new one is created otherwise)
        #[arg(long)]
        chat: Option<String>,
        /// Image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a conversation
    Delete {
        id: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// List entries, most recent first
    List,
    /// Show an entry
    Show { id: String },
    /// Write a new entry
    New { content: String },
    /// Replace the content of an entry
    Update { id: String, content: String },
    /// Analyze text without saving it
    Analyze { content: String },
    /// Delete an entry
    Delete {
        id: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current settings
    Show,
    /// List persona templates
    Templates,
    /// Select a persona template and save its prompt
    Select { name: String },
    /// Save a system prompt
    Save {
        #[arg(long)]
        prompt: String,
        /// Persona template to record as selected
        #[arg(long)]
        template: Option<String>,
    },
}

impl Commands {
    fn skips_confirmation(&self) -> bool {
        match self {
            Commands::Wipe { yes } => *yes,
            Commands::Chats {
                action: ChatAction::Delete { yes, .. },
            }
            | Commands::Journal {
                action: JournalAction::Delete { yes, .. },
            } => *yes,
            _ => false,
        }
    }
}

/// Configuration file, environment, then `--api-base`.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let mut config = service
        .get_config()
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    Ok(config)
}

fn build_coordinator(command: &Commands, config: &ClientConfig) -> Result<SessionCoordinator> {
    tracing::info!("[Solace] Using service at {}", config.api_base);

    let client = HttpRemoteClient::from_config(config)
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
    let confirmation: Arc<dyn Confirmation> = if command.skips_confirmation() {
        Arc::new(FixedConfirmation(true))
    } else {
        Arc::new(PromptConfirmation)
    };

    Ok(SessionCoordinator::new(
        RemoteServices::from_backend(Arc::new(client)),
        Arc::new(ConsoleNotifier),
        confirmation,
    ))
}

async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let coordinator = build_coordinator(&cli.command, &config)?;
    let c = &coordinator;

    match cli.command {
        Commands::Chats { action } => match action {
            ChatAction::List => commands::chats::list(c).await?,
            ChatAction::Show { id } => commands::chats::show(c, &id).await?,
            ChatAction::Send { text, chat, image } => {
                commands::chats::send(c, &text, chat.as_deref(), image.as_deref()).await?
            }
            ChatAction::Delete { id, .. } => commands::chats::delete(c, &id).await?,
        },
        Commands::Journal { action } => match action {
            JournalAction::List => commands::journal::list(c).await?,
            JournalAction::Show { id } => commands::journal::show(c, &id).await?,
            JournalAction::New { content } => commands::journal::new(c, &content).await?,
            JournalAction::Update { id, content } => {
                commands::journal::update(c, &id, &content).await?
            }
            JournalAction::Analyze { content } => commands::journal::analyze(c, &content).await?,
            JournalAction::Delete { id, .. } => commands::journal::delete(c, &id).await?,
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(c).await?,
            SettingsAction::Templates => commands::settings::templates(c).await?,
            SettingsAction::Select { name } => commands::settings::select(c, &name).await?,
            SettingsAction::Save { prompt, template } => {
                commands::settings::save(c, &prompt, template).await?
            }
        },
        Commands::Wipe { .. } => commands::memory::wipe(c).await?,
        Commands::Repl => repl::run(c).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let level = config
        .as_ref()
        .map(|config| config.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let _log_guard = logging::init(level);

    let outcome = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Coordinator failures were already shown by the notifier.
            if e.downcast_ref::<SolaceError>().is_none() {
                eprintln!("{}", format!("Error: {:#}", e).red());
            }
            ExitCode::FAILURE
        }
    }
}
