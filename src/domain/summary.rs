//! Win/loss statistics over closed transactions.

use super::signal::Transaction;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeStats {
    pub played: usize,
    pub wins: usize,
    pub loses: usize,
    /// Floored percentage of winning trades.
    pub win_pct: u32,
    pub avg_win: Option<f64>,
    /// Absolute value of the mean losing change.
    pub avg_loss: Option<f64>,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    NoData,
    Stats(TradeStats),
}

impl Summary {
    pub fn compute(transactions: &[Transaction]) -> Self {
        if transactions.is_empty() {
            return Summary::NoData;
        }

        let mut wins = 0usize;
        let mut loses = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut net = 0.0_f64;

        for trade in transactions {
            if trade.is_win() {
                wins += 1;
                total_wins += trade.change;
            } else {
                loses += 1;
                total_losses += trade.change;
            }
            net += trade.change;
        }

        let played = transactions.len();
        let win_pct = (wins as f64 / played as f64 * 100.0).floor() as u32;

        let avg_win = if wins > 0 {
            Some(total_wins / wins as f64)
        } else {
            None
        };

        let avg_loss = if loses > 0 {
            Some((total_losses / loses as f64).abs())
        } else {
            None
        };

        Summary::Stats(TradeStats {
            played,
            wins,
            loses,
            win_pct,
            avg_win,
            avg_loss,
            net,
        })
    }

    pub fn played(&self) -> usize {
        match self {
            Summary::NoData => 0,
            Summary::Stats(stats) => stats.played,
        }
    }

    pub fn net(&self) -> f64 {
        match self {
            Summary::NoData => 0.0,
            Summary::Stats(stats) => stats.net,
        }
    }

    pub fn stats(&self) -> Option<&TradeStats> {
        match self {
            Summary::NoData => None,
            Summary::Stats(stats) => Some(stats),
        }
    }
}
