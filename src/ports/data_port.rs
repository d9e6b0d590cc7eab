//! Price data access port trait.

use crate::domain::error::EquityError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

pub trait PriceSource {
    /// Load the full series, sorted by date.
    fn load(&self) -> Result<PriceSeries, EquityError>;

    /// (first date, last date, record count)
    fn data_range(&self) -> Result<(NaiveDate, NaiveDate, usize), EquityError> {
        let series = self.load()?;
        let (first, last) = series.date_range();
        Ok((first, last, series.len()))
    }
}
