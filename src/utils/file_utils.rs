/// File handling utilities
///
/// This module provides utility functions for reading text resources,
/// materializing the sample text and collecting the files to analyze.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::core::analysis::normalize_newlines;
use crate::core::analyzer::AnalyzerError;

/// Default name of the sample file
pub const SAMPLE_FILE_NAME: &str = "sample.txt";

/// Text written by `create_sample_file`
pub const SAMPLE_TEXT: &str = "Python is a powerful programming language.
It is widely used in web development, data science, and automation.
Python's simple syntax makes it great for beginners.
Many companies use Python for their projects.";

/// Read a whole text resource into memory.
///
/// The file handle is dropped before returning on every path. Invalid UTF-8
/// sequences are replaced rather than treated as failures, and `\r\n` or lone
/// `\r` line endings are read back as `\n`.
///
/// # Arguments
///
/// * `file_path` - Path to the resource
///
/// # Returns
///
/// The decoded content, or `ResourceNotFound` when the path does not exist
pub fn read_text_resource(file_path: &Path) -> Result<String, AnalyzerError> {
    let mut file = File::open(file_path).map_err(|e| AnalyzerError::from_io(file_path, e))?;

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| AnalyzerError::from_io(file_path, e))?;

    let mut content = match String::from_utf8(buffer) {
        Ok(content) => content,
        Err(e) => {
            warn!("File {} is not valid UTF-8, decoding lossily", file_path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    if content.contains('\r') {
        content = normalize_newlines(&content).into_owned();
    }

    Ok(content)
}

/// Write the sample text to `file_path`, replacing any existing file
pub fn create_sample_file(file_path: &Path) -> Result<()> {
    fs::write(file_path, SAMPLE_TEXT)
        .with_context(|| format!("Failed to create sample file: {}", file_path.display()))?;
    debug!("Created {}", file_path.display());
    Ok(())
}

/// Limits applied when collecting files
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Glob patterns a file name must match (empty matches everything)
    pub include: Vec<String>,
    /// Glob patterns that reject a file
    pub exclude: Vec<String>,
    /// Largest accepted file in bytes
    pub max_size_bytes: u64,
    /// Maximum number of files to collect
    pub max_files: usize,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            max_size_bytes: 50 * 1024 * 1024,
            max_files: 1000,
        }
    }
}

impl FileFilter {
    fn accepts_name(&self, name: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|pattern| glob_match(name, pattern));
        let excluded = self.exclude.iter().any(|pattern| glob_match(name, pattern));
        included && !excluded
    }

    fn accepts_size(&self, path: &Path, size: u64) -> bool {
        if size > self.max_size_bytes {
            warn!(
                "Skipping {}: exceeds maximum file size ({:.2} MB)",
                path.display(),
                size as f64 / 1024.0 / 1024.0
            );
            return false;
        }
        true
    }
}

/// Keep explicitly named files that pass the size limit.
///
/// Missing paths are kept so the analyzer can report them as not found.
pub fn filter_named_files(paths: &[PathBuf], filter: &FileFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        match path.metadata() {
            Ok(metadata) if metadata.is_dir() => {
                warn!("Skipping {}: not a file", path.display());
            }
            Ok(metadata) => {
                if filter.accepts_size(path, metadata.len()) {
                    files.push(path.clone());
                }
            }
            Err(_) => {
                debug!("{} does not exist, leaving it to the analyzer", path.display());
                files.push(path.clone());
            }
        }
    }

    files
}

/// Recursively collect files under `dir` that pass `filter`
pub fn collect_directory_files(dir: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if files.len() >= filter.max_files {
            warn!("Reached maximum file limit ({})", filter.max_files);
            break;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        if !filter.accepts_name(&file_name) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => {
                if filter.accepts_size(file_path, metadata.len()) {
                    files.push(file_path.to_path_buf());
                }
            }
            Err(e) => error!("Error reading metadata for {}: {}", file_path.display(), e),
        }
    }

    Ok(files)
}

/// Match a file name against a glob with `*` and `?` wildcards
pub fn glob_match(text: &str, pattern: &str) -> bool {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    match Regex::new(&format!("^{}$", escaped)) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            error!("Invalid glob pattern {}: {}", pattern, e);
            false
        }
    }
}
