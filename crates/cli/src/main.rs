use anyhow::{Context, Result};
use banter_chat::{DeliveryOutcome, DeliveryPipeline};
use banter_core::logging::{LoggingConfig, init_logging};
use banter_core::{
    Author, Config, Identity, Message, SessionProvider, StaticSession, TranscriptStore, UuidIds, welcome_messages,
};
use banter_providers::{ChatBackend, HttpBackend, MockBackend};
use banter_ui::{App, badge_label, calendar_millis};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Banter - chat with a remote text-generation service from the terminal
#[derive(Parser, Debug)]
#[command(name = "banter")]
#[command(about = "A terminal chat client for a remote text-generation service", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to banter.toml (default: ./banter.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Sign in with this display name (overrides [identity] in the config)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Email shown next to the display name
    #[arg(long, value_name = "EMAIL")]
    email: Option<String>,

    /// Answer from a TOML file of scripted replies instead of the service
    #[arg(long, value_name = "FILE")]
    mock: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive TUI session
    Start,
    /// Send one message, wait for the outcome and print the transcript
    Send {
        #[arg(required = true, value_name = "TEXT")]
        text: String,
    },
    /// Show current configuration
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("banter.toml"));
    let config = load_or_create_config(&config_path)?;

    if cli.verbose {
        println!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
    }

    let session = Arc::new(StaticSession::new(resolve_identity(&config, cli.name.clone(), cli.email.clone())));

    match &cli.command {
        Commands::Start => cmd_start(&config, &cli, session),
        Commands::Send { text } => cmd_send(&config, &cli, session, text),
        Commands::Status => cmd_status(&config, session.as_ref(), cli.verbose),
    }
}

/// Load config from file or create from example
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    } else {
        println!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
        println!("{} Creating config from example...", "Info:".blue().bold());

        std::fs::write(path, Config::example()).context("Failed to create config")?;

        println!(
            "{} Created config at {}. Please edit it with your settings.",
            "Success:".green().bold(),
            path.display()
        );

        anyhow::bail!("Please edit {} with your settings and run again", path.display())
    }
}

/// Command-line identity wins over the config file
fn resolve_identity(config: &Config, name: Option<String>, email: Option<String>) -> Option<Identity> {
    match name {
        Some(name) => {
            let email = email.or_else(|| config.identity.as_ref().and_then(|i| i.email.clone()));
            Some(Identity { name: Some(name), email })
        }
        None => config.identity.clone().map(Identity::from),
    }
}

fn build_backend(config: &Config, mock: Option<&Path>) -> Result<Arc<dyn ChatBackend>> {
    match mock {
        Some(path) => {
            let backend = MockBackend::from_file(path)
                .with_context(|| format!("Failed to load mock replies from {}", path.display()))?;
            Ok(Arc::new(backend))
        }
        None => Ok(Arc::new(HttpBackend::from_config(&config.service))),
    }
}

fn build_pipeline(config: &Config, cli: &Cli, session: Arc<StaticSession>) -> Result<DeliveryPipeline> {
    let backend = build_backend(config, cli.mock.as_deref())?;
    let store = TranscriptStore::seeded(welcome_messages(&config.chat.bot_name, &UuidIds));
    let privacy = LoggingConfig::from(config.logging.clone()).privacy;
    Ok(DeliveryPipeline::new(store, backend, session).with_privacy(privacy))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

/// Start the interactive TUI session
fn cmd_start(config: &Config, cli: &Cli, session: Arc<StaticSession>) -> Result<()> {
    let file_level = if config.logging.file.enabled { config.logging.file.level.clone() } else { "info".to_string() };
    let logging = LoggingConfig::from(config.logging.clone()).with_file_logging(file_level).without_stderr();
    let _guard = init_logging(Some(logging)).context("Failed to initialize logging")?;

    let pipeline = build_pipeline(config, cli, session.clone())?;
    let mut app = App::new(pipeline, session, config.chat.bot_name.clone());

    tracing::info!(url = %config.service.url(), "starting chat session");
    runtime()?.block_on(app.run()).context("Terminal UI failed")
}

/// Send a single message and print the resulting transcript
fn cmd_send(config: &Config, cli: &Cli, session: Arc<StaticSession>, text: &str) -> Result<()> {
    let mut logging = LoggingConfig::from(config.logging.clone());
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    let _guard = init_logging(Some(logging)).context("Failed to initialize logging")?;

    let pipeline = build_pipeline(config, cli, session)?;
    let mut composer = banter_chat::Composer::new();
    composer.set_text(text);

    let outcome = runtime()?.block_on(async {
        match pipeline.submit_draft(&mut composer) {
            Some(handle) => handle.await.map(Some).context("Delivery task failed"),
            None => Ok(None),
        }
    })?;

    let now = chrono::Local::now();
    for message in pipeline.store().snapshot().messages() {
        println!("{}", format_message(message, &config.chat.bot_name, &now));
    }

    match outcome {
        None => anyhow::bail!("Nothing to send: the message is empty"),
        Some(DeliveryOutcome::Failed { reason, .. }) => anyhow::bail!("Message was not delivered: {}", reason),
        Some(DeliveryOutcome::Delivered { .. }) => Ok(()),
    }
}

/// One transcript entry as a colored terminal line
fn format_message(message: &Message, bot_name: &str, now: &chrono::DateTime<chrono::Local>) -> String {
    let badge = badge_label(message.author, bot_name);
    let badge = match message.author {
        Author::Bot => badge.blue().bold().to_string(),
        Author::User => badge.magenta().bold().to_string(),
        Author::System => badge.dimmed().to_string(),
    };
    let stamp = format!("[{}]", calendar_millis(message.sent_at, now));
    let body =
        if message.failed_to_send { message.message.red().to_string() } else { message.message.clone() };

    format!("{} {} {}", stamp.dimmed(), badge, body)
}

/// Show current configuration
fn cmd_status(config: &Config, session: &dyn SessionProvider, verbose: bool) -> Result<()> {
    println!("{}", "Banter Status".green().bold().underline());
    println!();

    println!("{} Service", "Info:".blue().bold());
    println!("  URL: {}", config.service.url().cyan());
    println!("  Bot name: {}", config.chat.bot_name.cyan());

    println!();
    println!("{} Session", "Info:".blue().bold());
    match session.current_identity() {
        Some(identity) => println!("  {}", identity.describe().cyan()),
        None => println!("  {}", "Not signed in".yellow()),
    }

    if verbose {
        println!();
        println!("{} Logging", "Info:".blue().bold());
        println!("  Level: {}", config.logging.level.cyan());
        println!("  Format: {}", config.logging.format.cyan());
        println!(
            "  File logging: {}",
            if config.logging.file.enabled { "enabled".green().to_string() } else { "disabled".dimmed().to_string() }
        );
        println!("  Message bodies: {}", config.logging.privacy.log_message_bodies.cyan());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::MessageId;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["banter", "status"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.name.is_none());
        assert!(cli.mock.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::try_parse_from(["banter", "--config", "/path/to/banter.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/banter.toml")));
    }

    #[test]
    fn test_cli_identity_flags() {
        let cli = Cli::try_parse_from(["banter", "--name", "octocat", "--email", "o@example.com", "start"]).unwrap();
        assert_eq!(cli.name.as_deref(), Some("octocat"));
        assert_eq!(cli.email.as_deref(), Some("o@example.com"));
        assert!(matches!(cli.command, Commands::Start));
    }

    #[test]
    fn test_cli_send_command() {
        let cli = Cli::try_parse_from(["banter", "send", "hello there"]).unwrap();
        match cli.command {
            Commands::Send { text } => assert_eq!(text, "hello there"),
            other => panic!("Expected Send command, got {:?}", other),
        }
        assert!(Cli::try_parse_from(["banter", "send"]).is_err());
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("banter.toml");
        std::fs::write(&config_path, Config::example()).unwrap();

        let config = load_or_create_config(&config_path).unwrap();
        assert_eq!(config.chat.bot_name, "Ada but better");
    }

    #[test]
    fn test_load_or_create_config_not_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("banter.toml");

        assert!(load_or_create_config(&config_path).is_err());
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[service]"));
        assert!(content.contains("bot_name"));
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("banter.toml");
        std::fs::write(&config_path, "invalid toml").unwrap();

        assert!(load_or_create_config(&config_path).is_err());
    }

    #[test]
    fn test_resolve_identity() {
        let mut config = Config::default();
        assert!(resolve_identity(&config, None, None).is_none());

        config.identity =
            Some(banter_core::IdentityConfig { name: Some("cfg".to_string()), email: Some("cfg@example.com".to_string()) });
        let from_config = resolve_identity(&config, None, None).unwrap();
        assert_eq!(from_config.name.as_deref(), Some("cfg"));

        let from_flag = resolve_identity(&config, Some("flag".to_string()), None).unwrap();
        assert_eq!(from_flag.name.as_deref(), Some("flag"));
        assert_eq!(from_flag.email.as_deref(), Some("cfg@example.com"));
    }

    #[test]
    fn test_cmd_status() {
        let session = StaticSession::new(Some(Identity::new("octocat", "o@example.com")));
        assert!(cmd_status(&Config::default(), &session, true).is_ok());
        assert!(cmd_status(&Config::default(), &StaticSession::new(None), false).is_ok());
    }

    #[test]
    fn test_format_message() {
        let now = chrono::Local::now();
        let failed = Message::user(MessageId::new("u1"), now.timestamp_millis(), "lost").mark_failed();
        let line = format_message(&failed, "bot", &now);
        assert!(line.contains("You"));
        assert!(line.contains("lost"));
        assert!(line.contains("Today at"));

        let reply = Message::bot(MessageId::new("b1"), now.timestamp_millis(), "hi");
        assert!(format_message(&reply, "Ada but better", &now).contains("Ada but better"));
    }

    #[test]
    fn test_build_backend_with_missing_mock_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        let err = build_backend(&Config::default(), Some(&missing)).err().unwrap();
        assert!(err.to_string().contains("mock replies"));
    }

    #[test]
    fn test_send_with_mock_backend() {
        let temp = TempDir::new().unwrap();
        let mock_path = temp.path().join("replies.toml");
        std::fs::write(&mock_path, "[[replies]]\ntype = \"failure\"\nid = \"m2\"\nreason = \"rate limited\"\n").unwrap();

        let cli = Cli::try_parse_from(["banter", "--mock", mock_path.to_str().unwrap(), "send", "hi"]).unwrap();
        let config = Config::default();
        let pipeline = build_pipeline(&config, &cli, Arc::new(StaticSession::new(None))).unwrap();

        let outcome = runtime().unwrap().block_on(async { pipeline.submit("hi").unwrap().await }).unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
        assert_eq!(pipeline.store().len(), 4);
    }
}
