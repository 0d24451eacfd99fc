/// Simple example demonstrating how to use the toolbox library

use anyhow::Result;
use std::path::PathBuf;
use toolbox::app;
use toolbox::core::password::{self, PasswordConfig};
use toolbox::core::temperature::{self, TemperatureUnit};
use toolbox::utils::file_utils;
use toolbox::TextAnalyzer;

fn main() -> Result<()> {
    let dir = std::env::temp_dir().join("toolbox_demo");
    std::fs::create_dir_all(&dir)?;

    // Create sample file
    let file_path = dir.join(file_utils::SAMPLE_FILE_NAME);
    file_utils::create_sample_file(&file_path)?;

    let analyzer = TextAnalyzer::new(&file_path);
    println!("Analyzing file: {}", analyzer.path().display());

    let result = analyzer.analyze()?;
    println!("Lines: {}", result.line_count());
    println!("Words: {}", result.word_count());
    println!("Longest word: {}", result.longest_word());
    for (word, count) in result.top_words(5) {
        println!("  '{}': {} times", word, count);
    }

    // Missing files are skipped by analyze_all
    let files = vec![file_path, PathBuf::from("does_not_exist.txt")];
    for (path, result) in app::analyze_all(&files) {
        println!("{}: {} words", path, result.word_count());
    }

    let config = PasswordConfig { length: 16, ..PasswordConfig::default() };
    let generated = password::generate(&config)?;
    println!("\nPassword: {} ({})", generated, password::password_strength(&generated));

    println!("{}", temperature::convert(37.0, TemperatureUnit::Celsius));

    Ok(())
}
