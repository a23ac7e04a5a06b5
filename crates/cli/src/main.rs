//! `omniconvert` -- queue files and convert them in one pass.
//!
//! Each input is categorized from its extension, given its category's
//! default target (or `--target` when the category offers it) and
//! converted. Completed results are written to `--output-dir`.
//!
//! # Environment variables
//!
//! | Variable                | Required   | Default | Description                       |
//! |-------------------------|------------|---------|-----------------------------------|
//! | `GEMINI_API_KEY`        | AI targets | --      | Inference service key             |
//! | `CONVERT_MAX_IN_FLIGHT` | no         | `1`     | Conversions in flight per pass    |
//! | `CONVERT_MAX_FILE_MB`   | no         | `10`    | Per-file size ceiling             |
//! | `CONVERT_OUTPUT_DIR`    | no         | `.`     | Where converted files are written |
//! | `LOG_FORMAT`            | no         | --      | `json` for JSON log lines         |
//!
//! Exits with a failure code if any file was rejected or ended in ERROR.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use omniconvert_cli::args::Args;
use omniconvert_cli::config::AppConfig;
use omniconvert_cli::{media, output};
use omniconvert_codec::ImageCodec;
use omniconvert_core::catalog;
use omniconvert_core::category::Category;
use omniconvert_core::entry::{ConversionStatus, Entry};
use omniconvert_gemini::GeminiInference;
use omniconvert_pipeline::{ConversionQueue, Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    if args.list_options {
        print_options();
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::load(&args);
    let dispatcher = Dispatcher::new(
        Arc::new(ImageCodec::new()),
        Arc::new(GeminiInference::from_config(&config.gemini)),
    );
    let queue = ConversionQueue::new(dispatcher, config.queue);

    let mut payloads = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        payloads.push(media::load_payload(path).await?);
    }

    let added = queue.add_files(payloads).await;
    for rejection in &added.rejected {
        println!("REJECTED    {}  {}", rejection.file_name, rejection.error);
    }

    if let Some(target) = &args.target {
        for id in &added.accepted {
            let Some(entry) = queue.get(*id).await else {
                continue;
            };
            if entry.status() == ConversionStatus::Idle && !queue.set_target(*id, target).await {
                tracing::warn!(
                    file = %entry.payload.name,
                    category = %entry.category,
                    target_format = %target,
                    default_target = %entry.target_format,
                    "Target not offered for this category; keeping default",
                );
            }
        }
    }

    let summary = queue.run_queue().await?;
    tracing::debug!(?summary, "Pass summary");

    let mut failed = !added.rejected.is_empty();
    for entry in queue.entries().await {
        failed |= entry.status() == ConversionStatus::Error;
        report(&queue, &entry, &args.output_dir).await?;
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "omniconvert=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print one status line for `entry`, writing its artifact if completed.
async fn report(
    queue: &ConversionQueue,
    entry: &Entry,
    output_dir: &std::path::Path,
) -> anyhow::Result<()> {
    let name = &entry.payload.name;
    let size = entry.payload.size_label();

    match entry.status() {
        ConversionStatus::Completed => {
            let Some(artifact) = queue.download(entry.id).await else {
                return Ok(());
            };
            let path = output::write_artifact(output_dir, &artifact)
                .await
                .with_context(|| format!("Failed to write {}", artifact.file_name))?;
            println!("{:<11} {name} ({size}) -> {}", entry.status(), path.display());
        }
        ConversionStatus::Error => {
            let message = entry.error().unwrap_or_default();
            println!("{:<11} {name} ({size})  {message}", entry.status());
        }
        status => {
            println!("{status:<11} {name} ({size})");
        }
    }
    Ok(())
}

fn print_options() {
    for category in [Category::Image, Category::Audio, Category::TextCode, Category::Pdf] {
        println!("{category}");
        for option in catalog::options(category) {
            println!("  {:<22} {} - {}", option.value, option.label, option.description);
        }
    }
}
