//! Exif Decoder - dump the Exif/TIFF tag directories of an image segment.
//!
//! Reads one file, decodes it and prints every directory with its tags and
//! recorded errors. Decoding problems never change the exit code; only I/O
//! and configuration errors do.

use std::fmt::Write as _;
use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_decoder::{config::Config, Metadata, OutputFormat, TagValue};
use exif_decoder::{read_exif_segment, read_tiff};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let data = match std::fs::read(&config.input) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            error!("Failed to read {}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let metadata = if config.treat_as_exif_segment(&data) {
        debug!(len = data.len(), "Decoding as Exif segment");
        read_exif_segment(data)
    } else {
        debug!(len = data.len(), "Decoding as raw TIFF");
        read_tiff(data)
    };

    if metadata.has_errors() {
        info!("Decoding finished with recorded errors");
    }

    match config.format {
        OutputFormat::Text => {
            print!("{}", render_text(&metadata, config.max_blob_preview));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&metadata) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize metadata: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_decoder=debug"
    } else {
        "exif_decoder=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Text Output
// =============================================================================

fn render_text(metadata: &Metadata, max_blob_preview: usize) -> String {
    let mut out = String::new();

    for directory in metadata.directories() {
        let _ = writeln!(out, "[{}]", directory.kind().name());
        for (tag, value) in directory.tags() {
            let _ = writeln!(
                out,
                "  0x{:04X} {:<10} {}",
                tag,
                value.type_name(),
                render_value(value, max_blob_preview)
            );
        }
        for message in directory.errors() {
            let _ = writeln!(out, "  error: {}", message);
        }
        out.push('\n');
    }

    out
}

fn render_value(value: &TagValue, max_blob_preview: usize) -> String {
    match value {
        TagValue::Int(v) => v.to_string(),
        TagValue::IntArray(values) => {
            let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
        TagValue::String(s) => format!("{:?}", s),
        TagValue::Rational(r) => match r.to_f64() {
            Some(decimal) => format!("{} ({})", r, decimal),
            None => r.to_string(),
        },
        TagValue::RationalArray(values) => {
            let parts: Vec<String> = values.iter().map(|r| r.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
        TagValue::ByteArray(bytes) => {
            let shown = bytes.len().min(max_blob_preview);
            let mut rendered = hex::encode(&bytes[..shown]);
            if shown < bytes.len() {
                let _ = write!(rendered, "... ({} bytes)", bytes.len());
            }
            rendered
        }
    }
}
