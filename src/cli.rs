//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::averages_csv::write_averages;
use crate::adapters::csv_adapter::CsvPriceSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::{floor_display, TextReportAdapter};
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{
    check_date_order, parse_optional_date, validate_backtest_config,
};
use crate::domain::error::EquityError;
use crate::domain::moving_average::{compute_averages, WindowSize};
use crate::domain::summary::Summary;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceSource;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "equity", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Price CSV file (overrides [data] path)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Average window; anything but a positive integer means 100
        #[arg(short, long, allow_hyphen_values = true)]
        window: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the averages as CSV
        #[arg(long)]
        averages: Option<PathBuf>,
    },
    /// Write the moving averages of a price file as CSV
    Averages {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long, allow_hyphen_values = true)]
        window: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the date range of a price file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Where a backtest reads its prices and writes its output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSettings {
    pub data_path: Option<PathBuf>,
    pub backtest: BacktestConfig,
    pub output: Option<PathBuf>,
    pub averages_output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            data,
            window,
            from,
            to,
            output,
            averages,
        } => run_backtest(
            config.as_deref(),
            Overrides {
                data,
                window,
                from,
                to,
                output,
                averages,
            },
        ),
        Command::Averages {
            data,
            window,
            output,
        } => run_averages(&data, window.as_deref(), output.as_deref()),
        Command::Info { data } => run_info(&data),
        Command::Validate { config } => run_validate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, EquityError> {
    FileConfigAdapter::from_file(path)
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, EquityError> {
    let invalid = |reason: String| EquityError::ConfigInvalid {
        section: "backtest".into(),
        key: "window_size".into(),
        reason,
    };
    let window_size = match adapter.get_int_opt("backtest", "window_size") {
        None => WindowSize::default(),
        Some(Ok(value)) => WindowSize::from_signed(value).map_err(|e| invalid(e.to_string()))?,
        Some(Err(raw)) => return Err(invalid(format!("'{}' is not an integer", raw))),
    };

    Ok(BacktestConfig {
        window_size,
        start_date: parse_optional_date(adapter, "start_date")?,
        end_date: parse_optional_date(adapter, "end_date")?,
    })
}

pub fn build_run_settings(adapter: &dyn ConfigPort) -> Result<RunSettings, EquityError> {
    validate_backtest_config(adapter)?;
    let path = |section: &str, key: &str| {
        adapter
            .get_string(section, key)
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(s.trim()))
    };

    Ok(RunSettings {
        data_path: path("data", "path"),
        backtest: build_backtest_config(adapter)?,
        output: path("report", "output"),
        averages_output: path("report", "averages_output"),
    })
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub window: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub output: Option<PathBuf>,
    pub averages: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, settings: RunSettings) -> RunSettings {
        let backtest = BacktestConfig {
            window_size: self
                .window
                .as_deref()
                .map(WindowSize::parse_or_default)
                .unwrap_or(settings.backtest.window_size),
            start_date: self.from.or(settings.backtest.start_date),
            end_date: self.to.or(settings.backtest.end_date),
        };
        RunSettings {
            data_path: self.data.or(settings.data_path),
            backtest,
            output: self.output.or(settings.output),
            averages_output: self.averages.or(settings.averages_output),
        }
    }
}

pub fn run_backtest(config_path: Option<&Path>, overrides: Overrides) -> Result<(), EquityError> {
    let settings = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = load_config(path)?;
            build_run_settings(&adapter)?
        }
        None => RunSettings::default(),
    };
    let settings = overrides.apply(settings);

    let data_path = settings
        .data_path
        .clone()
        .ok_or_else(|| EquityError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;

    eprintln!("Loading prices from {}", data_path.display());
    let source = CsvPriceSource::new(data_path);
    run_backtest_pipeline(&source, &settings)?;
    Ok(())
}

pub fn run_backtest_pipeline(
    source: &dyn PriceSource,
    settings: &RunSettings,
) -> Result<BacktestResult, EquityError> {
    let config = &settings.backtest;
    check_date_order(config.start_date, config.end_date)?;
    let series = source.load()?;
    let selected = config.select(&series)?;
    let (first, last) = selected.date_range();

    eprintln!(
        "Running backtest: {}, {} records, {} to {}",
        config.window_size,
        selected.len(),
        first,
        last
    );
    let result = backtest_engine::run_backtest(&selected, config.window_size);

    print_console_summary(&result);

    let report = TextReportAdapter::new();
    match &settings.output {
        Some(path) => {
            report.write(&result, path)?;
            eprintln!("\nReport written to: {}", path.display());
        }
        None => report.render(&result, &mut io::stdout().lock())?,
    }

    if let Some(path) = &settings.averages_output {
        write_averages(&result.averages, File::create(path)?)?;
        eprintln!("Averages written to: {}", path.display());
    }

    Ok(result)
}

fn print_console_summary(result: &BacktestResult) {
    eprintln!("\n=== Results ===");
    eprintln!("Averages:         {}", result.averages.len());
    match result.summary() {
        Summary::NoData => eprintln!("Transactions:     none"),
        Summary::Stats(stats) => {
            eprintln!("Transactions:     {}", stats.played);
            eprintln!("Win Rate:         {}%", stats.win_pct);
            eprintln!("Net:              {}", floor_display(stats.net));
        }
    }
}

pub fn run_averages(
    data_path: &Path,
    window: Option<&str>,
    output: Option<&Path>,
) -> Result<(), EquityError> {
    let window = window.map(WindowSize::parse_or_default).unwrap_or_default();
    let series = CsvPriceSource::new(data_path.to_path_buf()).load()?;
    let averages = compute_averages(&series, window);
    info!(window = window.get(), averages = averages.len(), "computed averages");

    match output {
        Some(path) => {
            write_averages(&averages, File::create(path)?)?;
            eprintln!("{} averages written to: {}", averages.len(), path.display());
        }
        None => write_averages(&averages, io::stdout().lock())?,
    }
    Ok(())
}

pub fn run_info(data_path: &Path) -> Result<(), EquityError> {
    let source = CsvPriceSource::new(data_path.to_path_buf());
    let (first, last, count) = source.data_range()?;
    println!(
        "{}: {} records, {} to {}",
        data_path.display(),
        count,
        first,
        last
    );
    Ok(())
}

pub fn run_validate(config_path: &Path) -> Result<(), EquityError> {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = load_config(config_path)?;
    let settings = build_run_settings(&adapter)?;

    if let Some(path) = &settings.data_path {
        eprintln!("  data:        {}", path.display());
    }
    eprintln!("  window:      {}", settings.backtest.window_size);
    if let Some(start) = settings.backtest.start_date {
        eprintln!("  start_date:  {}", start);
    }
    if let Some(end) = settings.backtest.end_date {
        eprintln!("  end_date:    {}", end);
    }

    eprintln!("\nConfiguration is valid.");
    Ok(())
}
