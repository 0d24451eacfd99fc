/// Utility modules for the toolbox
///
/// This module contains utility functions for file handling and output
/// formatting.

pub mod file_utils;
pub mod output_formatter;
