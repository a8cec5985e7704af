use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctext::api::{create_router, AppState};
use doctext::config::Config;
use doctext::processing::{make_preview, BatchExtractor, TextExtractor};
use doctext::report;

/// Characters of extracted text shown by `doctext extract`.
const CLI_PREVIEW_CHARS: usize = 500;

#[derive(Parser)]
#[command(name = "doctext", version)]
#[command(about = "Extract plain text and metadata from PDF, Word, PowerPoint and Excel documents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a single document and save its text into the output directory
    Extract {
        file: PathBuf,
        /// Where to write `<name>_extracted_text.txt` (defaults to DOCTEXT_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Extract a directory of documents or an explicit list of files
    Batch {
        /// A single directory, or one or more files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Glob pattern used in directory mode; repeatable
        #[arg(long = "pattern")]
        patterns: Vec<String>,
        /// Where to save the JSON report (defaults to the output directory)
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
    /// Run the HTTP upload service
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doctext=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match args.command {
        Command::Extract { file, output_dir } => {
            let output_dir = output_dir.unwrap_or_else(|| config.batch.output_dir.clone());
            tokio::task::spawn_blocking(move || run_extract(&file, &output_dir)).await?
        }
        Command::Batch {
            paths,
            output_dir,
            patterns,
            report_dir,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.batch.output_dir.clone());
            let report_dir = report_dir.unwrap_or_else(|| output_dir.clone());
            tokio::task::spawn_blocking(move || {
                run_batch(&paths, &output_dir, &patterns, &report_dir)
            })
            .await?
        }
        Command::Serve => serve(config).await,
    }
}

fn run_extract(file: &Path, output_dir: &Path) -> anyhow::Result<()> {
    println!("Extracting text from: {}", file.display());

    let extraction = TextExtractor::new()
        .extract(file)
        .map_err(|e| anyhow::anyhow!("Failed to extract text from file: {e}"))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let output_path = BatchExtractor::new(output_dir).output_path_for(file);
    std::fs::write(&output_path, &extraction.text)
        .with_context(|| format!("Error saving text to {}", output_path.display()))?;
    println!("Text saved to: {}", output_path.display());

    let rule = "=".repeat(50);
    println!("\n{}", report::render_metadata(&extraction.metadata));
    println!("\n{rule}\nTEXT PREVIEW (first {CLI_PREVIEW_CHARS} characters):\n{rule}");
    println!("{}", make_preview(&extraction.text, CLI_PREVIEW_CHARS));
    println!("{rule}");
    println!(
        "\nTotal characters extracted: {}",
        report::group_thousands(extraction.metadata.characters)
    );
    println!(
        "Total words extracted: {}",
        report::group_thousands(extraction.metadata.words)
    );

    Ok(())
}

fn run_batch(
    paths: &[PathBuf],
    output_dir: &Path,
    patterns: &[String],
    report_dir: &Path,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let batch = BatchExtractor::new(output_dir);

    let report = match paths {
        [dir] if dir.is_dir() => {
            if patterns.is_empty() {
                batch.process_directory(dir)?
            } else {
                batch.process_directory_with(dir, patterns)?
            }
        }
        _ => {
            let (existing, missing): (Vec<&PathBuf>, Vec<&PathBuf>) =
                paths.iter().partition(|p| p.exists());
            for path in &missing {
                tracing::warn!("File not found, skipping: {}", path.display());
            }
            if existing.is_empty() {
                anyhow::bail!("No existing files found to process");
            }
            batch.run_batch(existing)
        }
    };

    println!("\n{}", report::render_summary(&report));

    std::fs::create_dir_all(report_dir)
        .with_context(|| format!("Failed to create {}", report_dir.display()))?;
    match report::save_report(&report, report_dir) {
        Ok(path) => println!("Detailed report saved: {}", path.display()),
        Err(e) => tracing::warn!("Could not save detailed report: {}", e),
    }

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone());
    state
        .uploads
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", config.uploads.dir.display()))?;

    let cancel_token = CancellationToken::new();
    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Doctext starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);
    tracing::info!("  Upload dir:   {}", config.uploads.dir.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
    cancel_token.cancel();
}
