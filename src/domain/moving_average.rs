//! Trailing simple moving average over closing prices.
//!
//! Each average is taken over the `n` records strictly before the record it
//! is reported against, then rounded half-up to a whole number. Signal timing
//! depends on that rounding, so it happens here rather than at display time.

use crate::domain::error::{EquityError, InvalidInput};
use crate::domain::price::{check_records, PriceRecord, PriceSeries};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

pub const DEFAULT_WINDOW_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    pub fn new(value: usize) -> Result<Self, InvalidInput> {
        NonZeroUsize::new(value)
            .map(WindowSize)
            .ok_or(InvalidInput::InvalidWindow { value: 0 })
    }

    pub fn from_signed(value: i64) -> Result<Self, InvalidInput> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(WindowSize)
            .ok_or(InvalidInput::InvalidWindow { value })
    }

    /// Lenient parse for interactive input: anything that is not a positive
    /// integer falls back to [`DEFAULT_WINDOW_SIZE`].
    pub fn parse_or_default(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|v| Self::from_signed(v).ok())
            .unwrap_or_default()
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize(NonZeroUsize::new(DEFAULT_WINDOW_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragePoint {
    pub date: NaiveDate,
    pub avg: f64,
}

/// Round half-up, so `x.5` always goes towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// One [`AveragePoint`] per record from index `window` onwards.
///
/// Series no longer than the window produce no averages.
pub fn compute_averages(series: &PriceSeries, window: WindowSize) -> Vec<AveragePoint> {
    averages_over(series.records(), window.get())
}

/// Validating entry point over a raw record slice.
pub fn compute_average_records(
    records: &[PriceRecord],
    window: usize,
) -> Result<Vec<AveragePoint>, EquityError> {
    let window = WindowSize::new(window)?;
    check_records(records)?;
    Ok(averages_over(records, window.get()))
}

fn averages_over(records: &[PriceRecord], window: usize) -> Vec<AveragePoint> {
    if records.len() <= window {
        return Vec::new();
    }

    let mut closes: VecDeque<f64> = records[..window].iter().map(|r| r.close).collect();
    let mut values = Vec::with_capacity(records.len() - window);

    for record in &records[window..] {
        let sum: f64 = closes.iter().sum();
        values.push(AveragePoint {
            date: record.date,
            avg: round_half_up(sum / window as f64),
        });
        closes.pop_front();
        closes.push_back(record.close);
    }

    values
}
