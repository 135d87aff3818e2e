use clap::Parser;
use fitcalc::{
    config::{Config, ConfigStore, FileConfigStore, OutputFormat},
    logging,
    package::{load_packages, process_packages, sample_packages, PackageOutcome},
    summary::{Locale, SessionSummary},
};
use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::info;

/// workout calculator for running, sports walking and swimming sessions
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Computes distance, mean speed and calories burned from raw workout readings. Without --input it runs the built-in sample packages."
)]
pub struct Cli {
    /// packages file (.json array of {workout_type, data} or .csv rows of tag,values...)
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// output format (defaults to the saved config, then text)
    #[clap(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// label language for text output (defaults to the saved config, then ru)
    #[clap(short = 'l', long, value_enum)]
    locale: Option<Locale>,

    /// config file to read and write instead of the per-user one
    #[clap(long)]
    config: Option<PathBuf>,

    /// store the effective format and locale as the new defaults
    #[clap(long)]
    save_config: bool,

    /// enable debug logging on stderr
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command-line flags win over saved defaults
    fn effective_config(&self, saved: Config) -> Config {
        Config {
            locale: self.locale.unwrap_or(saved.locale),
            format: self.format.unwrap_or(saved.format),
        }
    }
}

fn render(summary: &SessionSummary, config: &Config) -> Result<String, serde_json::Error> {
    match config.format {
        OutputFormat::Text => Ok(summary.format_with(config.locale)),
        OutputFormat::Json => serde_json::to_string(summary),
    }
}

/// Print summaries to `out` and failures to `err`; returns the failure count
fn report<W: Write, E: Write>(
    outcomes: &[PackageOutcome],
    config: &Config,
    out: &mut W,
    err: &mut E,
) -> Result<usize, Box<dyn Error>> {
    let mut failures = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(summary) => writeln!(out, "{}", render(summary, config)?)?,
            Err(e) => {
                failures += 1;
                writeln!(
                    err,
                    "error: package #{} ({}): {}",
                    outcome.index, outcome.package, e
                )?;
            }
        }
    }
    Ok(failures)
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = cli.config_store();
    let config = cli.effective_config(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("Saved defaults to {}", store.path().display());
    }

    let packages = match &cli.input {
        Some(path) => match load_packages(path) {
            Ok(packages) => packages,
            Err(e) => {
                eprintln!("error: {e}");
                return Ok(ExitCode::from(2));
            }
        },
        None => sample_packages(),
    };

    let outcomes = process_packages(&packages);
    let failures = report(&outcomes, &config, &mut io::stdout().lock(), &mut io::stderr())?;
    info!(
        "Processed {} packages, {} failed",
        outcomes.len(),
        failures
    );

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcalc::package::Package;

    fn run_report(packages: &[Package], config: &Config) -> (String, String, usize) {
        let outcomes = process_packages(packages);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let failures = report(&outcomes, config, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            failures,
        )
    }

    #[test]
    fn test_cli_flags_override_saved_config() {
        let cli = Cli::try_parse_from(["fitcalc", "--locale", "en"]).unwrap();
        let saved = Config {
            locale: Locale::Ru,
            format: OutputFormat::Json,
        };
        let config = cli.effective_config(saved);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["fitcalc"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.save_config);
        assert_eq!(cli.effective_config(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["fitcalc", "-l", "de"]).is_err());
    }

    #[test]
    fn test_report_samples_in_russian() {
        let (out, err, failures) = run_report(&sample_packages(), &Config::default());
        assert_eq!(failures, 0);
        assert!(err.is_empty());
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            [
                "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.",
                "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; Ср. скорость: 9.750 км/ч; Потрачено ккал: 797.805.",
                "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; Ср. скорость: 5.850 км/ч; Потрачено ккал: 349.252.",
            ]
        );
    }

    #[test]
    fn test_report_failures_go_to_err() {
        let packages = vec![
            Package::new("XYZ", vec![1.0, 1.0, 75.0]),
            Package::new("RUN", vec![15000.0, 1.0, 75.0]),
        ];
        let (out, err, failures) = run_report(&packages, &Config::default());
        assert_eq!(failures, 1);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Running"));
        assert_eq!(
            err.trim_end(),
            "error: package #1 (XYZ [1, 1, 75]): unknown workout type: \"XYZ\""
        );
    }

    #[test]
    fn test_report_json_lines() {
        let config = Config {
            locale: Locale::Ru,
            format: OutputFormat::Json,
        };
        let (out, _, _) = run_report(&sample_packages()[1..2], &config);
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["workout_type"], "Running");
        assert_eq!(value["distance_km"], 9.75);
    }
}
