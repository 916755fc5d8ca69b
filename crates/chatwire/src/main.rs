//! Command-line access to the chatwire utilities.
//!
//! # Examples
//!
//! ```sh
//! # Wrap a file and a question into one message
//! chatwire encode --file notes.txt --message "summarize this"
//!
//! # Strip the attachment block from a stored message
//! chatwire decode --stdin < message.txt
//!
//! # Clean a raw generation chunk
//! chatwire unwrap --text '{"result": {line one\nline two}}'
//!
//! # Watch the quota of a running backend
//! RUST_LOG=chatwire=debug chatwire poll --base-url http://127.0.0.1:8094
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use chatwire::PollerConfig;
use chatwire::message::preview::DEFAULT_PREVIEW_MARKER;
use chatwire::message::{FileAttachment, decode, encode, preview_with};
use chatwire::quota::{PollOutcome, QuotaClient, QuotaPoller, new_store, quota_display, quota_value};
use chatwire::stream::{unwrap_generation, window};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Chat client utilities: attachment envelopes, streaming windows and quota
/// polling.
#[derive(Parser)]
#[command(name = "chatwire", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fold an attachment and a message into one wire string
    Encode {
        /// Message text (trimmed). Read from stdin with --stdin instead.
        #[arg(long)]
        message: Option<String>,

        /// Read the message from stdin
        #[arg(long)]
        stdin: bool,

        /// File to attach (must be plain ASCII text)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Attachment name. Defaults to the file name of --file.
        #[arg(long)]
        name: Option<String>,
    },

    /// Strip attachment blocks from a stored message
    Decode(TextInput),

    /// Unwrap a raw generation chunk and keep its latest lines
    Unwrap(TextInput),

    /// Keep at most N lines of the input
    Window {
        #[command(flatten)]
        input: TextInput,

        /// Number of lines to keep
        #[arg(long)]
        max_lines: usize,

        /// Keep the first lines instead of the last
        #[arg(long)]
        head: bool,
    },

    /// Shorten a message to a preview
    Preview {
        #[command(flatten)]
        input: TextInput,

        /// Characters to keep
        #[arg(long, default_value_t = 50)]
        length: usize,

        /// Appended when the message is cut
        #[arg(long, default_value = DEFAULT_PREVIEW_MARKER)]
        marker: String,
    },

    /// Poll GET /quota and log every change
    Poll(PollArgs),
}

/// Text given inline or piped in.
#[derive(Args)]
struct TextInput {
    /// Input text
    #[arg(long)]
    text: Option<String>,

    /// Read the input from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct PollArgs {
    /// Backend base URL; the quota endpoint is <base-url>/quota
    #[arg(long, default_value = chatwire::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Milliseconds between poll cycles
    #[arg(long, default_value_t = 5000)]
    interval_ms: u64,

    /// Minimum milliseconds between two requests
    #[arg(long, default_value_t = 2500)]
    cooldown_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Run a single cycle and print its outcome
    #[arg(long)]
    once: bool,

    /// Stop after this many seconds (default: run until Ctrl-C)
    #[arg(long)]
    duration_secs: Option<u64>,
}

// ── Helpers ────────────────────────────────────────────────────────

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

impl TextInput {
    fn resolve(&self) -> Result<String, String> {
        match (&self.text, self.stdin) {
            (Some(text), false) => Ok(text.clone()),
            (None, true) => read_stdin_content(),
            (Some(_), true) => Err("use either --text or --stdin, not both".to_string()),
            (None, false) => Err("provide --text or --stdin".to_string()),
        }
    }
}

fn load_attachment(file: Option<&Path>, name: Option<&str>) -> Result<FileAttachment, String> {
    let Some(path) = file else {
        return Ok(FileAttachment::new(name.unwrap_or_default(), ""));
    };
    let bytes = std::fs::read(path)
        .map_err(|e| format!("failed to read attachment '{}': {e}", path.display()))?;
    let name = match name {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    FileAttachment::from_upload(name, &bytes)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// ── Commands ───────────────────────────────────────────────────────

async fn poll(args: &PollArgs) -> Result<String, String> {
    let config = PollerConfig::new(&args.base_url)
        .with_interval(Duration::from_millis(args.interval_ms))
        .with_cooldown(Duration::from_millis(args.cooldown_ms))
        .with_request_timeout(Duration::from_secs(args.timeout_secs));
    let client = QuotaClient::from_config(&config)?;
    let store = new_store();
    let poller = QuotaPoller::new(client, store.clone(), config.clone());

    if args.once {
        return match poller.poll_once().await {
            PollOutcome::Updated(_) => Ok(format!("{}\n", quota_display(&store))),
            PollOutcome::Rejected => Err("quota request rejected by backend".to_string()),
            PollOutcome::Failed(e) => Err(e),
            PollOutcome::Skipped => Err("quota request skipped".to_string()),
        };
    }

    info!("Polling {} every {:?}", config.quota_url(), config.interval);
    let handle = poller.start();
    let deadline = args
        .duration_secs
        .map(|s| tokio::time::Instant::now() + Duration::from_secs(s));

    let mut last = quota_value(&store);
    let mut received = false;
    let mut ticker = tokio::time::interval(config.interval.max(Duration::from_millis(100)));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => break,
            _ = ticker.tick() => {
                let current = quota_value(&store);
                if current != last {
                    info!("Quota: {}", quota_display(&store));
                    last = current;
                    received = true;
                }
            }
        }
    }

    handle.stop().await;
    if !received {
        warn!("No quota received from {}", config.quota_url());
    }
    Ok(format!("{}\n", quota_display(&store)))
}

async fn run(cli: &Cli) -> Result<String, String> {
    match &cli.command {
        Command::Encode {
            message,
            stdin,
            file,
            name,
        } => {
            let message = match (message, stdin) {
                (Some(m), false) => m.clone(),
                (None, true) => read_stdin_content()?,
                (Some(_), true) => {
                    return Err("use either --message or --stdin, not both".to_string());
                }
                (None, false) => return Err("provide --message or --stdin".to_string()),
            };
            let attachment = load_attachment(file.as_deref(), name.as_deref())?;
            Ok(encode(&attachment, &message))
        }
        Command::Decode(input) => Ok(decode(&input.resolve()?)),
        Command::Unwrap(input) => Ok(unwrap_generation(&input.resolve()?)),
        Command::Window {
            input,
            max_lines,
            head,
        } => Ok(window(&input.resolve()?, *max_lines, !head)),
        Command::Preview {
            input,
            length,
            marker,
        } => Ok(preview_with(&input.resolve()?, *length, marker)),
        Command::Poll(args) => poll(args).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
