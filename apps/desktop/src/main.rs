use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, ClipboardSink, Completion, ConversionController, HttpNotesBackend,
    NotesBackend, NotesSession, NullClipboard, Settings, WorkflowStatus,
};
use tracing_subscriber::EnvFilter;

mod host;

use host::{ArboardClipboard, DiskFileSaver, StderrNotifier};

#[derive(Parser, Debug)]
#[command(name = "lecturelm", about = "Turn lecture videos into editable study notes")]
struct Args {
    /// Base URL of the notes API (overrides lecturelm.toml and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate notes for a video and optionally export them as PDF
    Convert {
        url: String,
        /// Write the markdown notes to this file instead of stdout
        #[arg(long)]
        markdown_out: Option<PathBuf>,
        /// Also export the notes as PDF into the output directory
        #[arg(long)]
        pdf: bool,
        /// Copy the notes to the system clipboard
        #[arg(long)]
        copy: bool,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Check that the notes API is reachable
    Health,
}

fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(url) = &args.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    if let Command::Convert {
        output_dir: Some(dir),
        ..
    } = &args.command
    {
        settings.output_dir = dir.clone();
    }
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = apply_overrides(load_settings(), &args);
    let backend: Arc<dyn NotesBackend> = Arc::new(
        HttpNotesBackend::from_settings(&settings)
            .with_context(|| format!("failed to configure notes api '{}'", settings.api_base_url))?,
    );

    match args.command {
        Command::Health => {
            let health = backend
                .health()
                .await
                .with_context(|| format!("notes api at {} is unreachable", settings.api_base_url))?;
            if !health.is_ok() {
                bail!("notes api reported status '{}'", health.status);
            }
            println!("notes api at {} is healthy", settings.api_base_url);
        }
        Command::Convert {
            url,
            markdown_out,
            pdf,
            copy,
            ..
        } => {
            let clipboard: Box<dyn ClipboardSink> = if copy {
                Box::new(ArboardClipboard::default())
            } else {
                Box::new(NullClipboard)
            };
            let controller = ConversionController::new(
                Box::new(StderrNotifier),
                clipboard,
                Box::new(DiskFileSaver::new(settings.output_dir.clone())),
            )
            .with_export_filename(settings.export_filename.clone());
            let mut session = NotesSession::new(controller, backend);

            if session.convert(&url).await != WorkflowStatus::Ready {
                bail!("no notes were generated for '{url}'");
            }

            let notes = session.controller().notes();
            match &markdown_out {
                Some(path) => {
                    tokio::fs::write(path, notes)
                        .await
                        .with_context(|| format!("failed to write notes to {}", path.display()))?;
                    println!("Saved notes to {}", path.display());
                }
                None => println!("{notes}"),
            }

            if copy {
                session.copy();
            }

            if pdf && session.export().await != Some(Completion::Succeeded) {
                bail!("pdf export did not complete");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_loaded_settings() {
        let args = Args::parse_from([
            "lecturelm",
            "--api-url",
            "https://notes.example.com",
            "convert",
            "https://youtube.com/watch?v=abc",
            "--pdf",
            "--output-dir",
            "out",
        ]);

        let settings = apply_overrides(Settings::default(), &args);

        assert_eq!(settings.api_base_url, "https://notes.example.com");
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.request_timeout_secs, 120);
        assert!(matches!(args.command, Command::Convert { pdf: true, .. }));
    }

    #[test]
    fn convert_accepts_copy_flag() {
        let args = Args::try_parse_from(["lecturelm", "convert", "u", "--copy"]).expect("parse");
        assert!(matches!(
            args.command,
            Command::Convert {
                copy: true,
                pdf: false,
                ..
            }
        ));

        let args = Args::parse_from(["lecturelm", "convert", "u"]);
        assert!(matches!(args.command, Command::Convert { copy: false, .. }));
    }

    #[test]
    fn health_takes_no_positional_arguments() {
        assert!(Args::try_parse_from(["lecturelm", "health", "extra"]).is_err());
        let args = Args::parse_from(["lecturelm", "health", "--timeout-secs", "5"]);
        assert_eq!(apply_overrides(Settings::default(), &args).request_timeout_secs, 5);
    }
}
