//! OmniChat - chat with several LLM providers from the terminal
//!
//! Entry point with logging setup and terminal setup/cleanup.

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use omnichat_core::config::{load_config, sample_config};
use omnichat_core::{ChatConfig, ChatError, ProviderName, Result};
use omnichat_tui::TuiApp;
use ratatui::prelude::*;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: omnichat [OPTIONS]

Options:
  -p, --provider <NAME>   Provider selected at startup
                          (Gemini, Claude, ChatGPT, Grok, Perplexity)
  -c, --config <PATH>     Read configuration from PATH
      --sample-config     Print a sample configuration file and exit
  -h, --help              Print this help and exit

Environment:
  OPENAI_API_KEY, ANTHROPIC_API_KEY, GEMINI_API_KEY   provider keys
  OMNICHAT_DEFAULT_PROVIDER                           startup provider
  OMNICHAT_LOG                                        log filter (default: info)
";

/// Command-line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Provider selected at startup, overriding the config
    provider: Option<String>,
    /// Explicit config file
    config: Option<PathBuf>,
    help: bool,
    sample_config: bool,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> std::result::Result<Self, String> {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> std::result::Result<Self, String> {
        let mut args = args.into_iter();
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--provider" | "-p" => {
                    parsed.provider = Some(args.next().ok_or("--provider needs a value")?);
                }
                "--config" | "-c" => {
                    parsed.config = Some(PathBuf::from(
                        args.next().ok_or("--config needs a value")?,
                    ));
                }
                "--help" | "-h" => parsed.help = true,
                "--sample-config" => parsed.sample_config = true,
                other => return Err(format!("unexpected argument '{}'", other)),
            }
        }

        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }
    if args.sample_config {
        print!("{}", sample_config());
        return Ok(());
    }

    let log_path = init_logging();
    install_panic_hook();
    let config = resolve_config(&args)?;

    tracing::info!(
        version = omnichat_core::version(),
        provider = %config.default_provider(),
        "starting omnichat"
    );

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = TuiApp::new(&config);
    let result = app.run(&mut term);

    // Restore terminal (ALWAYS, even on error)
    terminal::disable_raw_mode()?;
    execute!(
        term.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    term.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("exiting with error: {}", e);
        eprintln!("Error: {}", e);
        if let Some(path) = log_path {
            eprintln!("See {} for details.", path.display());
        }
    }

    result
}

/// Load configuration and apply command-line overrides
fn resolve_config(args: &Args) -> Result<ChatConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
    });

    let mut config = match load_config(args.config.as_deref(), &cwd) {
        Ok(config) => config,
        // An explicit file that fails to load is fatal
        Err(e) if args.config.is_some() => return Err(e.into()),
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            tracing::warn!("failed to load config: {}", e);
            ChatConfig::default()
        }
    };

    if let Some(name) = &args.provider {
        let provider: ProviderName = name
            .parse()
            .map_err(|e| ChatError::config(format!("{}", e)))?;
        config.default_provider = provider.display_name().to_string();
    }

    Ok(config)
}

/// Send logs to `<cache_dir>/omnichat/omnichat.log`.
///
/// The terminal belongs to the UI, so nothing is logged when the file
/// cannot be opened.
fn init_logging() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("omnichat");
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join("omnichat.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env("OMNICHAT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

/// Route panics to the log instead of stderr, which the UI owns.
///
/// A panic on the UI thread also restores the terminal so the message
/// is readable after exit.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let message = panic_message(thread.name(), info);
        tracing::error!("{}", message);

        if thread.name() == Some("main") {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            eprintln!("{}", message);
        }
    }));
}

fn panic_message(thread: Option<&str>, info: &dyn std::fmt::Display) -> String {
    format!("thread '{}' {}", thread.unwrap_or("<unnamed>"), info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> std::result::Result<Args, String> {
        Args::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(
            parse(&["--provider", "claude", "-c", "chat.toml"]).unwrap(),
            Args {
                provider: Some("claude".into()),
                config: Some(PathBuf::from("chat.toml")),
                ..Args::default()
            }
        );
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--sample-config"]).unwrap().sample_config);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--provider"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_panic_message_names_thread() {
        assert_eq!(
            panic_message(Some("omnichat-req-1"), &"panicked at src/llm/adapter.rs:1:1"),
            "thread 'omnichat-req-1' panicked at src/llm/adapter.rs:1:1"
        );
        assert_eq!(
            panic_message(None, &"panicked"),
            "thread '<unnamed>' panicked"
        );
    }
}
