/// Core text analyzer implementation
///
/// This file contains the TextAnalyzer which reads a text resource and
/// produces line, word and character counts, the longest word and a word
/// frequency table.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use crate::core::analysis::{self, AnalysisResult, WordFrequencies};
use crate::utils::file_utils::read_text_resource;

/// Errors raised while loading a text resource
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The resource does not exist
    #[error("File '{}' not found!", .path.display())]
    ResourceNotFound { path: PathBuf },

    /// The resource exists but could not be read
    #[error("Failed to read '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalyzerError {
    /// Build the error matching an I/O failure on `path`
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            AnalyzerError::ResourceNotFound { path: path.to_path_buf() }
        } else {
            AnalyzerError::Unreadable { path: path.to_path_buf(), source }
        }
    }

    /// Whether this error means the resource is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalyzerError::ResourceNotFound { .. })
    }
}

/// Text analyzer bound to a single resource
///
/// Every operation opens the resource, reads it fully and releases the handle
/// before returning. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    /// Path of the analyzed resource
    path: PathBuf,
}

impl TextAnalyzer {
    /// Create a new TextAnalyzer for the resource at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Path of the analyzed resource
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<String, AnalyzerError> {
        read_text_resource(&self.path)
    }

    /// Count line records in the resource
    pub fn count_lines(&self) -> Result<usize, AnalyzerError> {
        Ok(analysis::line_count(&self.load()?))
    }

    /// Count whitespace-delimited tokens in the resource
    pub fn count_words(&self) -> Result<usize, AnalyzerError> {
        Ok(analysis::word_count(&self.load()?))
    }

    /// Count characters, optionally skipping space characters
    pub fn count_characters(&self, include_spaces: bool) -> Result<usize, AnalyzerError> {
        Ok(analysis::character_count(&self.load()?, include_spaces))
    }

    /// Longest punctuation-stripped token, empty when there are no tokens
    pub fn find_longest_word(&self) -> Result<String, AnalyzerError> {
        Ok(analysis::longest_word(&self.load()?))
    }

    /// Occurrence counts of normalized words
    pub fn word_frequency(&self) -> Result<WordFrequencies, AnalyzerError> {
        Ok(analysis::word_frequencies(&self.load()?))
    }

    /// Run the full analysis from a single read of the resource
    pub fn analyze(&self) -> Result<AnalysisResult, AnalyzerError> {
        info!("Analyzing file: {}", self.path.display());
        let start_time = Instant::now();

        let content = self.load()?;
        debug!("Read {} bytes from {}", content.len(), self.path.display());

        let result = AnalysisResult::from_content(&content);

        info!("Analysis completed in {:?}", start_time.elapsed());
        Ok(result)
    }
}

/// Count line records in the resource at `path`
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<usize, AnalyzerError> {
    TextAnalyzer::new(path).count_lines()
}

/// Count whitespace-delimited tokens in the resource at `path`
pub fn count_words<P: AsRef<Path>>(path: P) -> Result<usize, AnalyzerError> {
    TextAnalyzer::new(path).count_words()
}

/// Count characters in the resource at `path`
pub fn count_characters<P: AsRef<Path>>(
    path: P,
    include_spaces: bool,
) -> Result<usize, AnalyzerError> {
    TextAnalyzer::new(path).count_characters(include_spaces)
}

/// Longest word in the resource at `path`
pub fn find_longest_word<P: AsRef<Path>>(path: P) -> Result<String, AnalyzerError> {
    TextAnalyzer::new(path).find_longest_word()
}

/// Normalized word counts for the resource at `path`
pub fn word_frequency<P: AsRef<Path>>(path: P) -> Result<WordFrequencies, AnalyzerError> {
    TextAnalyzer::new(path).word_frequency()
}

/// Full analysis of the resource at `path`
pub fn analyze<P: AsRef<Path>>(path: P) -> Result<AnalysisResult, AnalyzerError> {
    TextAnalyzer::new(path).analyze()
}
