//! Replay configuration.
//!
//! Values come from an optional TOML file and are overridden by command
//! line flags:
//!
//! ```toml
//! format = "html"
//! min_chunk = 1
//! max_chunk = 8
//! seed = 42
//! delay_ms = 20
//! end_of_stream = "discard"
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use tickmark_core::{EndOfStream, TokenizerOptions};

/// Chunk sizes produced by a typical model stream.
pub const DEFAULT_MIN_CHUNK: usize = 2;
pub const DEFAULT_MAX_CHUNK: usize = 19;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid chunk range {min}..={max}: need 1 <= min <= max")]
    ChunkRange { min: usize, max: usize },
}

/// How rendered output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// HTML spans with inline styles
    Html,
    /// 256-colour terminal output
    #[default]
    Ansi,
    /// One JSON object per tokenizer event
    Jsonl,
    /// Final segment list, one per line
    Segments,
}

/// Fully resolved settings for one replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: Format,
    pub min_chunk: usize,
    pub max_chunk: usize,
    /// Chunking seed; random when absent
    pub seed: Option<u64>,
    /// Pause between chunks
    pub delay_ms: u64,
    pub end_of_stream: EndOfStream,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::default(),
            min_chunk: DEFAULT_MIN_CHUNK,
            max_chunk: DEFAULT_MAX_CHUNK,
            seed: None,
            delay_ms: 0,
            end_of_stream: EndOfStream::default(),
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub format: Option<Format>,
    pub min_chunk: Option<usize>,
    pub max_chunk: Option<usize>,
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
    pub end_of_stream: Option<EndOfStream>,
}

impl Config {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply command line values on top of this config and validate.
    pub fn merge(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(min) = overrides.min_chunk {
            self.min_chunk = min;
        }
        if let Some(max) = overrides.max_chunk {
            self.max_chunk = max;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(delay) = overrides.delay_ms {
            self.delay_ms = delay;
        }
        if let Some(policy) = overrides.end_of_stream {
            self.end_of_stream = policy;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_chunk == 0 || self.min_chunk > self.max_chunk {
            return Err(ConfigError::ChunkRange {
                min: self.min_chunk,
                max: self.max_chunk,
            });
        }
        Ok(())
    }

    pub fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions::new().with_end_of_stream(self.end_of_stream)
    }
}
