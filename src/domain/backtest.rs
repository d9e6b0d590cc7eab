//! Backtest pipeline: averages, crossover signals, closed transactions.
//!
//! BacktestConfig carries the window size and optional date bounds. Each run
//! starts from the series alone, so changing the window and running again
//! never sees results of an earlier run.

use crate::domain::error::{EquityError, InvalidInput};
use crate::domain::moving_average::{compute_averages, AveragePoint, WindowSize};
use crate::domain::price::{PriceRecord, PriceSeries};
use crate::domain::signal::{PositionTracker, Signal, Transaction};
use crate::domain::summary::Summary;
use chrono::NaiveDate;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestConfig {
    pub window_size: WindowSize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BacktestConfig {
    pub fn with_window(self, window_size: WindowSize) -> Self {
        BacktestConfig {
            window_size,
            ..self
        }
    }

    /// Restrict `series` to the configured date bounds.
    pub fn select(&self, series: &PriceSeries) -> Result<PriceSeries, InvalidInput> {
        match (self.start_date, self.end_date) {
            (None, None) => Ok(series.clone()),
            (from, to) => {
                let (first, last) = series.date_range();
                series.between(from.unwrap_or(first), to.unwrap_or(last))
            }
        }
    }

    pub fn run(&self, series: &PriceSeries) -> Result<BacktestResult, InvalidInput> {
        let selected = self.select(series)?;
        Ok(run_backtest(&selected, self.window_size))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub window_size: WindowSize,
    pub averages: Vec<AveragePoint>,
    pub transactions: Vec<Transaction>,
}

impl BacktestResult {
    pub fn summary(&self) -> Summary {
        Summary::compute(&self.transactions)
    }
}

pub fn run_backtest(series: &PriceSeries, window: WindowSize) -> BacktestResult {
    let averages = compute_averages(series, window);
    let records = series.records();

    let mut tracker = PositionTracker::new();
    let (mut buys, mut sells) = (0usize, 0usize);
    // averages[i] is reported against records[window + i]
    for (average, record) in averages.iter().zip(&records[window.get().min(records.len())..]) {
        match tracker.observe(average, record) {
            Signal::Buy => buys += 1,
            Signal::Sell => sells += 1,
            Signal::Hold => {}
        }
    }
    let transactions = tracker.finish(series.last());

    info!(
        window = window.get(),
        records = records.len(),
        averages = averages.len(),
        buys,
        sells,
        transactions = transactions.len(),
        "backtest complete"
    );

    BacktestResult {
        window_size: window,
        averages,
        transactions,
    }
}

/// Validating entry point over a raw record slice.
pub fn run_backtest_records(
    records: &[PriceRecord],
    window: usize,
) -> Result<BacktestResult, EquityError> {
    let window = WindowSize::new(window)?;
    let series = PriceSeries::new(records.to_vec())?;
    Ok(run_backtest(&series, window))
}

/// A sub-range of the series together with the averages that fall inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRange {
    pub series: PriceSeries,
    pub averages: Vec<AveragePoint>,
}

/// Slice `series` to `start..=end` and keep the already computed averages
/// dated within the slice.
///
/// `end` is inclusive, so the record under the end handle is shown. This is one
/// more record than a half-open `start..end` slider range selects. An `end`
/// past the series is clamped to the last record.
pub fn select_range(
    series: &PriceSeries,
    averages: &[AveragePoint],
    start: usize,
    end: usize,
) -> Result<ChartRange, InvalidInput> {
    let sliced = series.slice(start, end)?;
    let (first, last) = sliced.date_range();
    let averages = averages
        .iter()
        .filter(|a| a.date >= first && a.date <= last)
        .copied()
        .collect();
    Ok(ChartRange {
        series: sliced,
        averages,
    })
}
