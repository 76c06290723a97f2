//! logonlogoff-ingest — command-line driver for the event ingestor.
//!
//! Entry point: initialises structured logging, reads one event from a file
//! or stdin, runs it through [`EventIngestor`] and prints the response
//! envelope as JSON on stdout.

use clap::Parser;
use logonlogoff::store::{
    DryRunObjectStore, EnvParameterStore, FsObjectStore, MemoryParameterStore, ObjectStore,
    ParameterStore,
};
use logonlogoff::util::constants;
use logonlogoff::util::error::IngestError;
use logonlogoff::util::time::format_duration;
use logonlogoff::{EventIngestor, Response};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::Layer as _;

/// Validate one logon/logoff event and store it under its partition key.
#[derive(Debug, Parser)]
#[command(name = "logonlogoff-ingest", version)]
struct Cli {
    /// Event JSON file; reads stdin when omitted or `-`.
    #[arg(long, short)]
    event: Option<PathBuf>,

    /// JSON object of parameter name to value; uses environment variables
    /// (`LOGONLOGOFF_S3BUCKET`, `LOGONLOGOFF_PREFIXKEY`) when omitted.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Write objects under this directory as `<root>/<bucket>/<key>`.
    #[arg(long, conflicts_with = "dry_run")]
    store_root: Option<PathBuf>,

    /// Log the write instead of storing anything (default without --store-root).
    #[arg(long)]
    dry_run: bool,

    /// Directory for the persistent debug log.
    #[arg(long, env = constants::LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.as_deref().and_then(init_log_dir);
    init_logging(&log_dir);

    tracing::debug!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);
    if let Some(dir) = &log_dir {
        tracing::debug!("Log file: {}", dir.join(constants::LOG_FILE_NAME).display());
    }

    match run(&cli) {
        Ok(response) => {
            println!("{}", render(&response));
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}: {e}", constants::APP_NAME);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Response, IngestError> {
    let started = std::time::Instant::now();
    let event = read_event(cli.event.as_deref())?;

    let params: Box<dyn ParameterStore> = match &cli.params {
        Some(path) => Box::new(MemoryParameterStore::from_json_file(path)?),
        None => Box::new(EnvParameterStore::new()),
    };
    let store: Box<dyn ObjectStore> = match &cli.store_root {
        Some(root) if !cli.dry_run => Box::new(FsObjectStore::new(root)),
        _ => Box::new(DryRunObjectStore),
    };

    let response = EventIngestor::new(params, store).handle(event.as_ref());
    tracing::debug!(
        "Handled event with status {} in {}",
        response.status_code,
        format_duration(started.elapsed())
    );
    Ok(response)
}

/// Read the event document. Empty input means no event; input that is not
/// JSON is passed on as a JSON string, which extracts to an empty payload.
fn read_event(path: Option<&Path>) -> Result<Option<Value>, IngestError> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("Event input is not JSON ({e}), passing it as a string");
            Ok(Some(Value::String(text)))
        }
    }
}

fn render(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        tracing::error!("Failed to render response: {}", e);
        format!(r#"{{"statusCode":{},"body":""}}"#, response.status_code)
    })
}

/// Create the persistent log directory.
///
/// Returns `Some(path)` to the log directory on success, `None` if the
/// directory cannot be created (logging falls back to stderr only).
fn init_log_dir(dir: &Path) -> Option<PathBuf> {
    std::fs::create_dir_all(dir).ok()?;

    // Rotate the log file if it exceeds the size limit.
    let log_file = dir.join(constants::LOG_FILE_NAME);
    if let Ok(meta) = std::fs::metadata(&log_file) {
        if meta.len() > constants::MAX_LOG_FILE_SIZE {
            let backup = dir.join(constants::LOG_FILE_BACKUP_NAME);
            let _ = std::fs::rename(&log_file, &backup);
        }
    }

    Some(dir.to_path_buf())
}

/// Initialise the dual-layer tracing subscriber.
///
/// - **stderr layer**: filtered by `RUST_LOG` env var (default: `info`).
///   stdout is reserved for the response document.
/// - **file layer** (if `log_dir` is `Some`): always writes at `debug` level
///   to a persistent log file.
fn init_logging(log_dir: &Option<PathBuf>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if let Some(dir) = log_dir {
        let log_path = dir.join(constants::LOG_FILE_NAME);
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(tracing_subscriber::EnvFilter::new("debug"));

            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(env_filter))
                .with(file_layer)
                .init();
            return;
        }
    }

    // Fallback: stderr only
    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(env_filter))
        .init();
}
