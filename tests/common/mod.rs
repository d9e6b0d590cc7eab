#![allow(dead_code)]

use chrono::NaiveDate;
use equity::domain::error::EquityError;
pub use equity::domain::price::{PriceRecord, PriceSeries};
use equity::ports::data_port::PriceSource;

pub struct MockPriceSource {
    pub records: Vec<PriceRecord>,
    pub error: Option<String>,
}

impl MockPriceSource {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl PriceSource for MockPriceSource {
    fn load(&self) -> Result<PriceSeries, EquityError> {
        if let Some(reason) = &self.error {
            return Err(EquityError::DataRead {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(PriceSeries::new(self.records.clone())?)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(date: &str, close: f64) -> PriceRecord {
    PriceRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: Some(1000.0),
    }
}

/// One record per day starting at `start_date`, closes taken from `closes`.
pub fn records_from_closes(start_date: &str, closes: &[f64]) -> Vec<PriceRecord> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceRecord::from_close(start + chrono::Duration::days(i as i64), close))
        .collect()
}

pub fn series_from_closes(start_date: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(records_from_closes(start_date, closes)).unwrap()
}

/// Closes rising by `step` per day.
pub fn linear_closes(count: usize, start_price: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start_price + step * i as f64).collect()
}

/// Render `records` as a finance-download style CSV.
pub fn to_csv(records: &[PriceRecord]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.high,
            r.low,
            r.close,
            r.close,
            r.volume.unwrap_or(0.0)
        ));
    }
    out
}
