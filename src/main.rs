//! Assistant CLI — interactive keyword chatbot session.
//!
//! Thin wrapper over the `assistant` library crate. Hosts one widget session
//! on stdin/stdout: the panel is opened, the greeting printed, and every
//! non-empty line is submitted as a user message.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use assistant::{AssistantConfig, ChatSession, Role};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Giggs Assistant — a keyword-matching website chatbot in your terminal.
///
/// Commands: /quick lists quick replies, /quick N sends one, /history shows
/// the conversation, /quit or /exit leaves.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML or JSON file overriding parts of the built-in configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// PRNG seed for reproducible replies.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated thinking delay in milliseconds (overrides the config).
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Reply immediately.
    #[arg(long, conflicts_with = "delay_ms")]
    no_delay: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// A line that is a command rather than a message.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    History,
    ListQuick,
    Quick(usize),
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let rest = line.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let command = if name.eq_ignore_ascii_case("quit") || name.eq_ignore_ascii_case("exit") {
        Command::Quit
    } else if name.eq_ignore_ascii_case("history") {
        Command::History
    } else if name.eq_ignore_ascii_case("quick") {
        match parts.next().map(str::parse::<usize>) {
            None => Command::ListQuick,
            Some(Ok(n)) => Command::Quick(n),
            Some(Err(_)) => Command::Unknown(line.to_string()),
        }
    } else {
        Command::Unknown(line.to_string())
    };
    Some(command)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    // Load config overrides if specified.
    let mut config = match args.config {
        Some(ref path) => {
            eprintln!("Loading config from {}...", path.display());
            let config = AssistantConfig::load(path)?;
            eprintln!("Config loaded.");
            config
        }
        None => AssistantConfig::default(),
    };
    if args.no_delay {
        config.reply_delay_ms = 0;
    } else if let Some(ms) = args.delay_ms {
        config.reply_delay_ms = ms;
    }

    let mut chat = ChatSession::new(config, SmallRng::seed_from_u64(seed))?;
    let name = chat.config().name.clone();
    info!(seed, name = %name, "session started");

    // Opening the panel shows the greeting.
    chat.open();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    writeln!(stdout, "{name}: {}", chat.history()[0].text())?;

    // Conversation loop.
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let submitted = match parse_command(trimmed) {
            Some(Command::Quit) => break,
            Some(Command::History) => {
                for turn in chat.history() {
                    let speaker = match turn.role() {
                        Role::User => "You",
                        Role::Bot => name.as_str(),
                    };
                    writeln!(stdout, "[{speaker}] {}", turn.text())?;
                }
                continue;
            }
            Some(Command::ListQuick) => {
                for (i, text) in chat.quick_replies().iter().enumerate() {
                    writeln!(stdout, "  {}. {text}", i + 1)?;
                }
                continue;
            }
            Some(Command::Quick(n)) => {
                if n == 0 || n > chat.quick_replies().len() {
                    eprintln!("No quick reply #{n}");
                    continue;
                }
                chat.submit_quick_reply(n - 1)
            }
            Some(Command::Unknown(cmd)) => {
                eprintln!("Unknown command: {cmd}");
                continue;
            }
            None => chat.submit(trimmed),
        };

        let pending = match submitted {
            Ok(pending) => pending,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        if !pending.delay().is_zero() {
            thread::sleep(pending.delay());
        }

        let Some(turn) = chat.deliver(pending).cloned() else {
            continue;
        };
        writeln!(stdout, "{name}: {}", turn.text())?;
        if let Some(link) = chat.action_link(&turn) {
            writeln!(stdout, "  → {link} ({})", link.url)?;
        }
        stdout.flush()?;
    }

    Ok(())
}
