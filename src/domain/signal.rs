//! Crossover signals and single-position tracking.
//!
//! The tracker is a two-state machine. Flat goes long when the average is at
//! or below the close; long goes flat when the average is strictly above the
//! close. Every other combination is a no-op: no pyramiding, no shorting.

use crate::domain::moving_average::AveragePoint;
use crate::domain::price::PriceRecord;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    pub buy_price: f64,
    pub buy_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub buy_price: f64,
    pub buy_date: NaiveDate,
    pub sell_price: f64,
    pub sell_date: NaiveDate,
    pub change: f64,
}

impl Transaction {
    pub fn close(open: OpenPosition, sell_price: f64, sell_date: NaiveDate) -> Self {
        Transaction {
            buy_price: open.buy_price,
            buy_date: open.buy_date,
            sell_price,
            sell_date,
            change: sell_price - open.buy_price,
        }
    }

    /// Break-even trades count as wins.
    pub fn is_win(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Long(OpenPosition),
}

/// What a single observation did to the position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    state: PositionState,
    closed: Vec<Transaction>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    /// Feed one record together with the average reported against it.
    pub fn observe(&mut self, average: &AveragePoint, record: &PriceRecord) -> Signal {
        match self.state {
            PositionState::Flat if average.avg <= record.close => {
                debug!(date = %record.date, close = record.close, avg = average.avg, "buy");
                self.state = PositionState::Long(OpenPosition {
                    buy_price: record.close,
                    buy_date: record.date,
                });
                Signal::Buy
            }
            PositionState::Long(open) if average.avg > record.close => {
                let trade = Transaction::close(open, record.close, record.date);
                debug!(date = %record.date, close = record.close, avg = average.avg, change = trade.change, "sell");
                self.closed.push(trade);
                self.state = PositionState::Flat;
                Signal::Sell
            }
            _ => Signal::Hold,
        }
    }

    /// Close any open position at `last` and return every transaction.
    ///
    /// A tracker that never bought returns an empty list.
    pub fn finish(mut self, last: &PriceRecord) -> Vec<Transaction> {
        if let PositionState::Long(open) = self.state {
            debug!(date = %last.date, close = last.close, "closing open position at end of series");
            self.closed
                .push(Transaction::close(open, last.close, last.date));
        }
        self.closed
    }
}
