//! distinctlint CLI - flags SELECTs that should use DISTINCT

mod args;
mod config;
mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use distinctlint_core::{Analyzer, RuleInfo, SourceUnit, UnitInput};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, info};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.quiet {
        tracing::Level::ERROR
    } else {
        match args.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let quiet = args.quiet;
    match run(args.command, quiet) {
        Ok(has_findings) => {
            if has_findings {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(command: Command, quiet: bool) -> Result<bool> {
    match command {
        Command::Check {
            files,
            config: config_path,
            format,
            jobs,
        } => {
            let config = if let Some(path) = config_path {
                Config::from_file(&path)?
            } else {
                Config::find_and_load()?.unwrap_or_default()
            };

            // CLI takes precedence
            let config = config.merge_with_args(&files, format, jobs);

            if let Some(threads) = config.jobs {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .into_diagnostic()
                    .wrap_err("failed to configure worker threads")?;
            }

            let input_files = collect_files(&config.files)?;
            if input_files.is_empty() {
                miette::bail!(
                    "No input files specified. Use positional arguments or configure in distinctlint.toml"
                );
            }

            let analyzer = Analyzer::new();
            let output_format = config.output_format();
            let mut total_findings = 0;

            for path in &input_files {
                let input = load_input(path)?;
                let scanned = analyzer.scan_input(&input, true);
                let flagged: Vec<SourceUnit> = scanned
                    .units()
                    .iter()
                    .filter(|u| u.has_findings())
                    .cloned()
                    .collect();

                let count: usize = flagged.iter().map(|u| u.findings().len()).sum();
                debug!(file = %path.display(), findings = count, "scanned");

                if count > 0 {
                    OutputFormatter::new(output_format, path.display().to_string())
                        .print_findings(&flagged)?;
                    total_findings += count;
                }
            }

            if !quiet {
                if total_findings > 0 {
                    eprintln!();
                    eprintln!(
                        "Found {} finding(s) in {} file(s)",
                        total_findings,
                        input_files.len()
                    );
                } else {
                    eprintln!("All {} file(s) passed", input_files.len());
                }
            }

            Ok(total_findings > 0)
        }

        Command::Scan { input, sequential } => {
            let text = match &input {
                Some(path) => fs::read_to_string(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin()).into_diagnostic()?,
            };
            let units = UnitInput::from_json(&text).into_diagnostic()?;

            let output = Analyzer::new().scan_input(&units, !sequential);
            info!(findings = output.findings().count(), "scan complete");
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);

            Ok(false)
        }

        Command::Health => {
            let health = RuleInfo::current().health();
            println!("{}", serde_json::to_string(&health).into_diagnostic()?);
            Ok(false)
        }
    }
}

/// Expand glob patterns; plain paths are kept as given
fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}

/// `.json` files hold units; anything else is raw ABAP wrapped in one unit
fn load_input(path: &Path) -> Result<UnitInput> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        return UnitInput::from_json(&content)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to decode units in {}", path.display()));
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    let unit = SourceUnit::new(stem.clone(), stem, "FILE")
        .with_start_line(0)
        .with_code(content);
    Ok(UnitInput::Single(Box::new(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_plain_paths() {
        let files = collect_files(&["a.abap".to_string(), "units.json".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.abap"), PathBuf::from("units.json")]);
    }
}
