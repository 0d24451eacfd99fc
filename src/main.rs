/// Toolbox - small command-line utilities
///
/// The main entry point for the toolbox application. It parses command-line
/// arguments and dispatches to the text analyzer, the password generator or
/// the temperature converter.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, LevelFilter};
use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use toolbox::app::{self, FileReport};
use toolbox::config::{load_config, Config};
use toolbox::core::password::{self, PasswordConfig, DEFAULT_LENGTH};
use toolbox::core::temperature::{self, TemperatureError, TemperatureUnit};
use toolbox::utils::file_utils::{self, FileFilter};
use toolbox::utils::output_formatter;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "toolbox",
    version,
    about = "Small command-line utilities",
    long_about = "A set of small utilities:
- analyze: line, word and character counts, longest word and most common words of text files
- password: random passwords covering the selected character types, with a strength rating
- convert: Celsius / Fahrenheit conversion"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (JSON)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze text files
    Analyze(AnalyzeArgs),
    /// Generate random passwords
    Password(PasswordArgs),
    /// Convert a temperature between Celsius and Fahrenheit
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["file_paths", "dir", "sample", "prompt"]),
))]
struct AnalyzeArgs {
    /// Path(s) to the file(s) to analyze
    file_paths: Vec<PathBuf>,

    /// Analyze all files in directory (recursively)
    #[arg(long = "dir")]
    dir: Option<PathBuf>,

    /// Include only file names matching this glob (can be used multiple times)
    #[arg(long = "include")]
    include: Vec<String>,

    /// Exclude file names matching this glob (can be used multiple times)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Maximum file size to analyze in MB (default: from config, 50)
    #[arg(long = "max-size")]
    max_size: Option<u64>,

    /// Maximum number of files collected from --dir
    #[arg(long = "max-files", default_value = "1000")]
    max_files: usize,

    /// Number of most common words to show (default: from config, 5)
    #[arg(long = "top")]
    top: Option<usize>,

    /// Create sample.txt in the current directory and analyze it first
    #[arg(long = "sample")]
    sample: bool,

    /// Ask for an extra file name to analyze
    #[arg(long = "prompt")]
    prompt: bool,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md")]
    md: bool,

    /// Export results to JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Export results to HTML report
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Export word frequencies to CSV file
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Suppress terminal output
    #[arg(long = "quiet")]
    quiet: bool,

    /// Show only summary information
    #[arg(long = "summary-only")]
    summary_only: bool,

    /// Number of parallel workers (0=auto)
    #[arg(long = "parallel", default_value = "0")]
    parallel: usize,
}

#[derive(Args, Debug)]
struct PasswordArgs {
    /// Password length (default: from config, 12)
    #[arg(short = 'l', long = "length")]
    length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(long = "no-uppercase")]
    no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long = "no-lowercase")]
    no_lowercase: bool,

    /// Leave out digits
    #[arg(long = "no-digits")]
    no_digits: bool,

    /// Leave out special characters
    #[arg(long = "no-special")]
    no_special: bool,

    /// Number of alternative passwords to show
    #[arg(long = "alternatives", default_value = "3")]
    alternatives: usize,

    /// Ask for the options interactively
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Temperature value, or a full reading such as 36.6C
    #[arg(allow_hyphen_values = true)]
    value: Option<String>,

    /// Current unit (C or F)
    unit: Option<String>,
}

/// Main entry point function
fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Password(args) => run_password(args, &config),
        Command::Convert(args) => run_convert(args),
    }
}

/// Set up logging to stderr or to a log file
fn setup_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(cli.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(log_file) = &cli.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    builder.init();
}

/// Analyze the requested files and print or export the reports
fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let start_time = Instant::now();
    let top_n = args.top.unwrap_or(config.top_words);

    let files = get_files_to_analyze(&args, config)?;
    if files.is_empty() {
        eprintln!("{}", "Error: No files specified or found for analysis".red());
        eprintln!("Run with --help for usage information");
        process::exit(1);
    }

    let reports = analyze_files(&files, &args)?;
    export_all_results(&reports, top_n, &args)?;

    if !args.quiet {
        if !args.summary_only {
            for report in &reports {
                println!("\n{} {}", "Analyzing:".bold(), report.path);
                println!("{}", "-".repeat(40));
                print!("{}", output_formatter::format_report(report, top_n, args.md));
            }
        }

        if args.summary_only || reports.len() > 1 {
            println!("\n{}", "=".repeat(40).bold());
            print!("{}", output_formatter::create_summary(&reports, top_n));
        }

        info!("Finished in {:.2} seconds", start_time.elapsed().as_secs_f64());
    }

    if reports.iter().any(|report| report.outcome.is_err()) {
        std::io::Write::flush(&mut std::io::stdout())?;
        process::exit(1);
    }

    Ok(())
}

/// Get list of files to analyze based on command line arguments
fn get_files_to_analyze(args: &AnalyzeArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let filter = FileFilter {
        include: args.include.clone(),
        exclude: args.exclude.clone(),
        max_size_bytes: args
            .max_size
            .unwrap_or(config.max_file_size_mb)
            .saturating_mul(1024 * 1024),
        max_files: args.max_files,
    };

    let mut requested = Vec::new();

    if args.sample {
        let sample_path = PathBuf::from(file_utils::SAMPLE_FILE_NAME);
        file_utils::create_sample_file(&sample_path)?;
        if !args.quiet {
            println!("Created {}", sample_path.display());
        }
        requested.push(sample_path);
    }

    requested.extend(args.file_paths.iter().cloned());

    if args.prompt {
        let user_file: String = Input::new()
            .with_prompt("Enter a filename to analyze (or press Enter to skip)")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read file name")?;
        let user_file = user_file.trim();
        if !user_file.is_empty() {
            requested.push(PathBuf::from(user_file));
        }
    }

    let mut files = file_utils::filter_named_files(&requested, &filter);

    if let Some(dir) = &args.dir {
        files.extend(file_utils::collect_directory_files(dir, &filter)?);
    }

    Ok(files)
}

/// Analyze files, showing a spinner while several files are processed
fn analyze_files(files: &[PathBuf], args: &AnalyzeArgs) -> Result<Vec<FileReport>> {
    let spinner = if !args.quiet && files.len() > 1 {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Analyzing {} files...", files.len()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let reports = app::run_analyzer(files, args.parallel)?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(reports)
}

/// Export results based on command line arguments
fn export_all_results(reports: &[FileReport], top_n: usize, args: &AnalyzeArgs) -> Result<()> {
    if let Some(json_path) = &args.json {
        output_formatter::export_results_json(reports, top_n, json_path)?;
        info!("Wrote JSON report to {}", json_path.display());
    }

    if let Some(html_path) = &args.html {
        output_formatter::create_html_report(reports, top_n, html_path)?;
        info!("Wrote HTML report to {}", html_path.display());
    }

    if let Some(csv_path) = &args.csv {
        output_formatter::create_csv_report(reports, csv_path)?;
        info!("Wrote CSV report to {}", csv_path.display());
    }

    Ok(())
}

/// Generate a password and a few alternatives
fn run_password(args: PasswordArgs, config: &Config) -> Result<()> {
    let password_config = if args.interactive {
        prompt_password_config()?
    } else {
        PasswordConfig {
            length: args.length.unwrap_or(config.password.length),
            use_uppercase: config.password.use_uppercase && !args.no_uppercase,
            use_lowercase: config.password.use_lowercase && !args.no_lowercase,
            use_digits: config.password.use_digits && !args.no_digits,
            use_special: config.password.use_special && !args.no_special,
        }
    };

    println!("{}", "Password Generator".bold());
    println!("{}", "-".repeat(30));

    let password = match password::generate(&password_config) {
        Ok(password) => password,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(1);
        }
    };
    println!("\n{} {}", "Generated Password:".green().bold(), password);
    println!("{} {}", "Strength:".green(), password::password_strength(&password));

    if args.alternatives > 0 {
        println!("\n{}", "Alternative passwords:".cyan());
        for i in 0..args.alternatives {
            let alternative = password::generate(&password_config)?;
            println!(
                "{}. {} ({})",
                i + 1,
                alternative,
                password::password_strength(&alternative)
            );
        }
    }

    Ok(())
}

/// Ask for the password length and character types
fn prompt_password_config() -> Result<PasswordConfig> {
    let length_input: String = Input::new()
        .with_prompt(format!("Password length (default {})", DEFAULT_LENGTH))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read password length")?;

    let length = if length_input.trim().is_empty() {
        DEFAULT_LENGTH
    } else {
        match length_input.trim().parse::<usize>() {
            Ok(length) => length,
            Err(_) => {
                println!("Invalid length. Using default length {}.", DEFAULT_LENGTH);
                DEFAULT_LENGTH
            }
        }
    };

    Ok(PasswordConfig {
        length,
        use_uppercase: confirm("Include uppercase letters?")?,
        use_lowercase: confirm("Include lowercase letters?")?,
        use_digits: confirm("Include digits?")?,
        use_special: confirm("Include special characters?")?,
    })
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .context("Failed to read answer")
}

/// Convert a temperature given on the command line or interactively
fn run_convert(args: ConvertArgs) -> Result<()> {
    let parsed = match (&args.value, &args.unit) {
        (Some(value), Some(unit)) => parse_value_and_unit(value, unit),
        (Some(reading), None) => temperature::parse_reading(reading),
        (None, _) => {
            let value: String = Input::new()
                .with_prompt("Enter temperature value")
                .interact_text()
                .context("Failed to read temperature value")?;
            let unit: String = Input::new()
                .with_prompt("Enter current unit (C/F)")
                .interact_text()
                .context("Failed to read unit")?;
            parse_value_and_unit(&value, &unit)
        }
    };

    match parsed {
        Ok((value, unit)) => {
            println!("{}", temperature::convert(value, unit));
            Ok(())
        }
        Err(e) => {
            debug!("Rejected temperature input: {:?}", e);
            eprintln!("{}", e.to_string().red());
            process::exit(1);
        }
    }
}

fn parse_value_and_unit(value: &str, unit: &str) -> Result<(f64, TemperatureUnit), TemperatureError> {
    let value = temperature::parse_value(value)?;
    let unit = unit.parse::<TemperatureUnit>()?;
    Ok((value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::try_parse_from(["toolbox", "analyze", "a.txt", "--top", "3", "--md"]).unwrap();
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.file_paths, vec![PathBuf::from("a.txt")]);
                assert_eq!(args.top, Some(3));
                assert!(args.md);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_requires_input() {
        assert!(Cli::try_parse_from(["toolbox", "analyze"]).is_err());
    }

    #[test]
    fn test_convert_accepts_negative_values() {
        let cli = Cli::try_parse_from(["toolbox", "convert", "-40", "F"]).unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.value.as_deref(), Some("-40"));
                assert_eq!(args.unit.as_deref(), Some("F"));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_value_and_unit() {
        assert_eq!(parse_value_and_unit("100", "c"), Ok((100.0, TemperatureUnit::Celsius)));
        assert!(parse_value_and_unit("x", "c").is_err());
        assert!(parse_value_and_unit("1", "k").is_err());
    }
}
