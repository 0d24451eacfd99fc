/// Output formatter for analysis results
///
/// This module handles formatting and exporting analysis results in various formats,
/// including console output, JSON, HTML, and CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::app::FileReport;
use crate::core::analysis::AnalysisResult;

/// Format one analysis for console output
///
/// # Arguments
///
/// * `result` - Statistics for one file
/// * `top_n` - Number of most common words to list
/// * `use_markdown` - Whether to wrap the output in triple backticks
pub fn format_analysis(result: &AnalysisResult, top_n: usize, use_markdown: bool) -> String {
    let mut output = String::new();

    if use_markdown {
        output.push_str("```\n");
    }

    output.push_str(&format!("{} {}\n", "Lines:".cyan().bold(), result.line_count()));
    output.push_str(&format!("{} {}\n", "Words:".cyan().bold(), result.word_count()));
    output.push_str(&format!(
        "{} {}\n",
        "Characters (with spaces):".cyan().bold(),
        result.char_count_with_spaces()
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Characters (without spaces):".cyan().bold(),
        result.char_count_without_spaces()
    ));
    output.push_str(&format!("{} {}\n", "Longest word:".cyan().bold(), result.longest_word()));

    output.push_str(&format!(
        "\n{}\n",
        format!("Top {} most common words:", top_n).yellow().bold()
    ));
    let top_words = result.top_words(top_n);
    if top_words.is_empty() {
        output.push_str("  (no words)\n");
    }
    for (word, count) in top_words {
        output.push_str(&format!("  '{}': {} times\n", word, count));
    }

    if use_markdown {
        output.push_str("```\n");
    }

    output
}

/// Format a report for one file, including the not-found message
pub fn format_report(report: &FileReport, top_n: usize, use_markdown: bool) -> String {
    match &report.outcome {
        Ok(result) => format_analysis(result, top_n, use_markdown),
        Err(message) => format!("{}\n", format!("Error: {}", message).red()),
    }
}

/// Export results to a JSON file
///
/// # Arguments
///
/// * `reports` - One report per analyzed file
/// * `top_n` - Number of most common words to include
/// * `output_path` - Path where the JSON file will be written
pub fn export_results_json(reports: &[FileReport], top_n: usize, output_path: &Path) -> Result<()> {
    let entries: Vec<_> = reports
        .iter()
        .map(|report| match &report.outcome {
            Ok(result) => json!({
                "file": report.path,
                "analysis": result,
                "top_words": result.top_words(top_n),
            }),
            Err(message) => json!({
                "file": report.path,
                "error": message,
            }),
        })
        .collect();

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output file: {}", output_path.display()))?;

    serde_json::to_writer_pretty(file, &entries).context("Failed to write JSON data")?;

    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    word: &'a str,
    count: usize,
}

/// Create a CSV file with one row per (file, word) in ranking order
pub fn create_csv_report(reports: &[FileReport], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create CSV output file: {}", output_path.display()))?;

    let mut writer = csv::Writer::from_writer(file);

    for report in reports {
        if let Ok(result) = &report.outcome {
            for (word, count) in result.word_frequencies().ranked() {
                writer
                    .serialize(CsvRow { file: &report.path, word, count })
                    .context("Failed to write CSV record")?;
            }
        }
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Text Analysis Report</title>
    <style>
        body { font-family: Arial, sans-serif; color: #333; max-width: 960px; margin: 0 auto; padding: 20px; }
        h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
        h2 { color: #2980b9; margin-top: 30px; }
        .timestamp { color: #7f8c8d; font-size: 0.9em; margin-bottom: 30px; }
        .file { background-color: #f8f9fa; border-radius: 5px; padding: 15px; margin-bottom: 20px; }
        .error { color: #c0392b; }
        table { border-collapse: collapse; }
        td, th { padding: 4px 12px; border-bottom: 1px solid #eee; text-align: left; }
    </style>
</head>
<body>
    <h1>Text Analysis Report</h1>
    <div class="timestamp">Generated on: {{timestamp}}</div>
    {{#each files}}
    <div class="file">
        <h2>{{path}}</h2>
        {{#if error}}
        <p class="error">Error: {{error}}</p>
        {{else}}
        <table>
            <tr><th>Lines</th><td>{{lines}}</td></tr>
            <tr><th>Words</th><td>{{words}}</td></tr>
            <tr><th>Characters (with spaces)</th><td>{{chars_with_spaces}}</td></tr>
            <tr><th>Characters (without spaces)</th><td>{{chars_without_spaces}}</td></tr>
            <tr><th>Longest word</th><td>{{longest_word}}</td></tr>
        </table>
        <h3>Top {{top_n}} most common words</h3>
        <ol>
            {{#each top_words}}
            <li>{{word}}: {{count}} times</li>
            {{/each}}
        </ol>
        {{/if}}
    </div>
    {{/each}}
</body>
</html>
"#;

/// Create an HTML report
pub fn create_html_report(reports: &[FileReport], top_n: usize, output_path: &Path) -> Result<()> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("report", HTML_TEMPLATE)
        .context("Failed to register HTML template")?;

    let files: Vec<_> = reports
        .iter()
        .map(|report| match &report.outcome {
            Ok(result) => json!({
                "path": report.path,
                "lines": result.line_count(),
                "words": result.word_count(),
                "chars_with_spaces": result.char_count_with_spaces(),
                "chars_without_spaces": result.char_count_without_spaces(),
                "longest_word": result.longest_word(),
                "top_n": top_n,
                "top_words": result
                    .top_words(top_n)
                    .into_iter()
                    .map(|(word, count)| json!({ "word": word, "count": count }))
                    .collect::<Vec<_>>(),
            }),
            Err(message) => json!({ "path": report.path, "error": message }),
        })
        .collect();

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let data = json!({
        "timestamp": timestamp,
        "files": files,
    });

    let html = handlebars
        .render("report", &data)
        .context("Failed to render HTML template")?;

    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create HTML output file: {}", output_path.display()))?;
    file.write_all(html.as_bytes()).context("Failed to write HTML data")?;

    Ok(())
}

/// Create a summary of several analyzed files
pub fn create_summary(reports: &[FileReport], top_n: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", "Analysis Summary".yellow().bold()));
    output.push_str(&format!("Files analyzed: {}\n", reports.len()));

    let analyzed: Vec<&AnalysisResult> =
        reports.iter().filter_map(|r| r.outcome.as_ref().ok()).collect();
    let failed = reports.len() - analyzed.len();

    let total_lines: usize = analyzed.iter().map(|r| r.line_count()).sum();
    let total_words: usize = analyzed.iter().map(|r| r.word_count()).sum();
    output.push_str(&format!("Total lines: {}\n", total_lines));
    output.push_str(&format!("Total words: {}\n", total_words));
    if failed > 0 {
        output.push_str(&format!("{} {}\n", "Files with errors:".red(), failed));
    }

    // Longest word across files, earliest file wins ties
    let mut longest = "";
    for result in &analyzed {
        if result.longest_word().chars().count() > longest.chars().count() {
            longest = result.longest_word();
        }
    }
    if !longest.is_empty() {
        output.push_str(&format!("Longest word: {}\n", longest));
    }

    let heading = format!("Top {} words per file", top_n);
    output.push_str(&format!("\n{}\n", heading.cyan().bold()));
    for report in reports {
        if let Ok(result) = &report.outcome {
            let words: Vec<String> = result
                .top_words(top_n)
                .into_iter()
                .map(|(word, count)| format!("{} ({})", word, count))
                .collect();
            output.push_str(&format!("{}: {}\n", report.path, words.join(", ")));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(path: &str, content: &str) -> FileReport {
        FileReport {
            path: path.to_string(),
            outcome: Ok(AnalysisResult::from_content(content)),
        }
    }

    fn missing(path: &str) -> FileReport {
        FileReport {
            path: path.to_string(),
            outcome: Err(format!("File '{}' not found!", path)),
        }
    }

    #[test]
    fn test_format_analysis_lists_top_words() {
        colored::control::set_override(false);
        let output = format_analysis(&AnalysisResult::from_content("aa bb aa"), 5, false);
        assert!(output.contains("Lines: 1"));
        assert!(output.contains("Words: 3"));
        assert!(output.contains("Longest word: aa"));
        assert!(output.contains("'aa': 2 times"));
        assert!(output.find("'aa'").unwrap() < output.find("'bb'").unwrap());
    }

    #[test]
    fn test_format_report_not_found() {
        colored::control::set_override(false);
        let output = format_report(&missing("nope.txt"), 5, false);
        assert_eq!(output, "Error: File 'nope.txt' not found!\n");
    }

    #[test]
    fn test_markdown_fence() {
        let output = format_analysis(&AnalysisResult::from_content(""), 5, true);
        assert!(output.starts_with("```\n"));
        assert!(output.ends_with("```\n"));
    }

    #[test]
    fn test_exports() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![report("a.txt", "aa bb aa"), missing("b.txt")];

        let json_path = dir.path().join("out.json");
        export_results_json(&reports, 5, &json_path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value[0]["analysis"]["word_count"], 3);
        assert_eq!(value[0]["analysis"]["word_frequencies"]["aa"], 2);
        assert_eq!(value[1]["error"], "File 'b.txt' not found!");

        let csv_path = dir.path().join("out.csv");
        create_csv_report(&reports, &csv_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(csv, "file,word,count\na.txt,aa,2\na.txt,bb,1\n");

        let html_path = dir.path().join("out.html");
        create_html_report(&reports, 5, &html_path).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<li>aa: 2 times</li>"));
        assert!(html.contains("Top 5 most common words"));
        assert!(html.contains(r#"<p class="error">"#));
    }

    #[test]
    fn test_summary() {
        colored::control::set_override(false);
        let reports = vec![report("a.txt", "aa bb aa"), report("b.txt", "longer\nwords")];
        let summary = create_summary(&reports, 1);
        assert!(summary.contains("Files analyzed: 2"));
        assert!(summary.contains("Total lines: 3"));
        assert!(summary.contains("Total words: 5"));
        assert!(summary.contains("Longest word: longer"));
        assert!(summary.contains("a.txt: aa (2)"));
    }
}
