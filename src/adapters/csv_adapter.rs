//! CSV file price source.
//!
//! Reads daily price files with a header row, in the layout produced by the
//! usual finance download pages: `Date,Open,High,Low,Close,Adj Close,Volume`.
//! Columns are found by header name. Rows without a close price (`null` on
//! market holidays) are skipped; the adjusted close is ignored.

use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::EquityError;
use crate::domain::price::{PriceRecord, PriceSeries};
use crate::ports::data_port::PriceSource;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self) -> Result<PriceSeries, EquityError> {
        let file = File::open(&self.path).map_err(|e| EquityError::DataRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let records = read_prices(file)?;
        debug!(path = %self.path.display(), records = records.len(), "loaded prices");
        Ok(PriceSeries::new(records)?)
    }
}

struct Columns {
    date: usize,
    close: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, EquityError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| EquityError::DataParse {
                line: 1,
                reason: format!("missing {} column", name),
            })
        };
        Ok(Columns {
            date: required("date")?,
            close: required("close")?,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            volume: find("volume"),
        })
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return None;
    }
    raw.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Parse price rows from any reader, sorted ascending by date.
pub fn read_prices<R: Read>(reader: R) -> Result<Vec<PriceRecord>, EquityError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| EquityError::DataParse {
        line: 1,
        reason: format!("CSV header error: {}", e),
    })?;
    let columns = Columns::locate(headers)?;
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result.map_err(|e| EquityError::DataParse {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let date_str = row.get(columns.date).unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
            EquityError::DataParse {
                line,
                reason: format!("invalid date '{}': {}", date_str, e),
            }
        })?;

        let close_raw = row.get(columns.close).unwrap_or_default();
        let close = match parse_number(Some(close_raw)) {
            Some(v) => v,
            None if close_raw.is_empty() || close_raw.eq_ignore_ascii_case("null") => {
                debug!(line, %date, "skipping row without close price");
                continue;
            }
            None => {
                return Err(EquityError::DataParse {
                    line,
                    reason: format!("invalid close value '{}'", close_raw),
                });
            }
        };

        let field = |col: Option<usize>| parse_number(col.and_then(|c| row.get(c)));

        records.push(PriceRecord {
            date,
            open: field(columns.open).unwrap_or(close),
            high: field(columns.high).unwrap_or(close),
            low: field(columns.low).unwrap_or(close),
            close,
            volume: field(columns.volume),
        });
    }

    records.sort_by_key(|r| r.date);
    Ok(records)
}
