/// Toolbox - small command-line utilities
///
/// This library provides a plain-text file analyzer (line, word and character
/// counts, longest word, word frequencies), a random password generator with
/// strength scoring and a Celsius/Fahrenheit converter.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::analysis::{AnalysisResult, WordFrequencies};
pub use crate::core::analyzer::{AnalyzerError, TextAnalyzer};
pub use crate::core::password::{PasswordConfig, PasswordError, PasswordStrength};
pub use crate::core::temperature::{Conversion, TemperatureError, TemperatureUnit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze a single file and return its statistics
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `file_path` - Path to the file to analyze
///
/// # Returns
///
/// The analysis result, or `ResourceNotFound` when the file does not exist
pub fn analyze_file<P: AsRef<std::path::Path>>(file_path: P) -> Result<AnalysisResult, AnalyzerError> {
    TextAnalyzer::new(file_path).analyze()
}

/// Library configuration and utilities
pub mod config {
    use std::path::Path;

    use log::{error, info};
    use serde::Deserialize;

    use crate::core::password::PasswordConfig;

    /// Errors raised while loading a configuration file
    #[derive(Debug, thiserror::Error)]
    pub enum ConfigError {
        #[error("Failed to read configuration file {path}: {source}")]
        Read {
            path: String,
            #[source]
            source: std::io::Error,
        },

        #[error("Invalid JSON in configuration file {path}: {source}")]
        Parse {
            path: String,
            #[source]
            source: serde_json::Error,
        },
    }

    /// Application configuration
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Config {
        /// Number of most common words shown in reports
        pub top_words: usize,
        /// Files larger than this are skipped
        pub max_file_size_mb: u64,
        /// Defaults for the password generator
        pub password: PasswordConfig,
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                top_words: 5,
                max_file_size_mb: 50,
                password: PasswordConfig::default(),
            }
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file is logged and the defaults are used.
    pub fn load_config(config_path: Option<&Path>) -> Result<Config, ConfigError> {
        let Some(path) = config_path else {
            return Ok(Config::default());
        };

        if !path.exists() {
            error!("Configuration file not found: {}", path.display());
            return Ok(Config::default());
        }

        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Command-line application functionality
pub mod app {
    use std::path::{Path, PathBuf};

    use log::debug;
    use rayon::prelude::*;

    use crate::core::analysis::AnalysisResult;
    use crate::core::analyzer::TextAnalyzer;

    /// Outcome of analyzing one file
    ///
    /// A failure carries the message shown to the user instead of the raw error.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FileReport {
        pub path: String,
        pub outcome: Result<AnalysisResult, String>,
    }

    impl FileReport {
        /// Analyze `path` and capture the outcome
        pub fn analyze(path: &Path) -> Self {
            let outcome = TextAnalyzer::new(path).analyze().map_err(|e| {
                debug!("Error analyzing {}: {}", path.display(), e);
                e.to_string()
            });
            Self {
                path: path.to_string_lossy().to_string(),
                outcome,
            }
        }
    }

    /// Run the analyzer on multiple files
    ///
    /// Every file gets its own analyzer. Reports come back in input order.
    ///
    /// # Arguments
    ///
    /// * `file_paths` - Paths to files to analyze
    /// * `workers` - Number of worker threads (0 = available parallelism)
    pub fn run_analyzer(file_paths: &[PathBuf], workers: usize) -> anyhow::Result<Vec<FileReport>> {
        if file_paths.len() <= 1 || workers == 1 {
            return Ok(file_paths.iter().map(|p| FileReport::analyze(p)).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;

        Ok(pool.install(|| {
            file_paths
                .par_iter()
                .map(|p| FileReport::analyze(p))
                .collect()
        }))
    }

    /// Analyze every file and keep only the successful results
    pub fn analyze_all(file_paths: &[PathBuf]) -> Vec<(String, AnalysisResult)> {
        file_paths
            .iter()
            .map(|p| FileReport::analyze(p))
            .filter_map(|report| report.outcome.ok().map(|result| (report.path, result)))
            .collect()
    }
}
