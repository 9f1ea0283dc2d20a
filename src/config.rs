//! Configuration for the `exif-decoder` command-line tool.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `EXIF_` prefix.
//!
//! # Example
//!
//! ```ignore
//! use exif_decoder::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! println!("Decoding {}", config.input.display());
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_MODE` - Input framing: auto, exif or tiff (default: auto)
//! - `EXIF_FORMAT` - Output format: text or json (default: text)
//! - `EXIF_MAX_BLOB_PREVIEW` - Bytes of each blob shown in text output (default: 32)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default number of blob bytes rendered as hex in text output.
pub const DEFAULT_MAX_BLOB_PREVIEW: usize = 32;

// =============================================================================
// Value Enums
// =============================================================================

/// How the input file is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// Exif segment when the file starts with `Exif\0\0`, raw TIFF otherwise
    Auto,
    /// JPEG APP1 Exif segment payload
    Exif,
    /// Raw TIFF file
    Tiff,
}

/// How decoded metadata is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per directory, tags in hex
    Text,
    /// Pretty-printed JSON of the whole store
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Exif Decoder - dump the Exif/TIFF tag directories of an image segment.
///
/// Decodes IFD0, the Exif, GPS and interoperability sub-IFDs, the embedded
/// thumbnail and vendor maker notes. Decoding problems are printed next to
/// the directory they occurred in.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-decoder")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to an Exif segment or TIFF file.
    pub input: PathBuf,

    /// Input framing.
    #[arg(long, value_enum, default_value_t = InputMode::Auto, env = "EXIF_MODE")]
    pub mode: InputMode,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_FORMAT")]
    pub format: OutputFormat,

    /// Number of bytes of each blob value shown in text output.
    #[arg(long, default_value_t = DEFAULT_MAX_BLOB_PREVIEW, env = "EXIF_MAX_BLOB_PREVIEW")]
    pub max_blob_preview: usize,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("An input file is required".to_string());
        }

        if self.max_blob_preview == 0 {
            return Err(
                "max_blob_preview must be greater than 0. \
                 Set --max-blob-preview or EXIF_MAX_BLOB_PREVIEW"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Whether `data` should be decoded as an Exif segment.
    pub fn treat_as_exif_segment(&self, data: &[u8]) -> bool {
        match self.mode {
            InputMode::Exif => true,
            InputMode::Tiff => false,
            InputMode::Auto => crate::exif::has_exif_preamble(data),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
