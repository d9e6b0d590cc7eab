//! Daily price records and the validated price series.

use crate::domain::error::InvalidInput;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceRecord {
    /// A record where every price field equals `close`.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        PriceRecord {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }
}

/// Non-empty, strictly chronological sequence of price records.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(records: Vec<PriceRecord>) -> Result<Self, InvalidInput> {
        check_records(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> &PriceRecord {
        &self.records[0]
    }

    pub fn last(&self) -> &PriceRecord {
        &self.records[self.records.len() - 1]
    }

    /// (first date, last date)
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first().date, self.last().date)
    }

    /// Records `start..=end` (inclusive end, not half-open), with `end`
    /// clamped to the last record.
    pub fn slice(&self, start: usize, end: usize) -> Result<PriceSeries, InvalidInput> {
        let len = self.records.len();
        if start > end || start >= len {
            return Err(InvalidInput::InvalidRange { start, end, len });
        }
        let end = end.min(len - 1);
        Ok(PriceSeries {
            records: self.records[start..=end].to_vec(),
        })
    }

    /// Records dated within `from..=to`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Result<PriceSeries, InvalidInput> {
        let records: Vec<PriceRecord> = self
            .records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(InvalidInput::EmptySeries);
        }
        Ok(PriceSeries { records })
    }

    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }
}

pub(crate) fn check_records(records: &[PriceRecord]) -> Result<(), InvalidInput> {
    if records.is_empty() {
        return Err(InvalidInput::EmptySeries);
    }
    if let Some(index) = records.iter().position(|r| !r.close.is_finite()) {
        return Err(InvalidInput::NonFiniteClose {
            index,
            date: records[index].date,
        });
    }
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(InvalidInput::NotChronological {
                index: i + 1,
                previous: pair[0].date,
                date: pair[1].date,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn make_records(closes: &[f64]) -> Vec<PriceRecord> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRecord::from_close(date(i as u32 + 1), close))
            .collect()
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(PriceSeries::new(vec![]), Err(InvalidInput::EmptySeries));
    }

    #[test]
    fn new_rejects_out_of_order() {
        let mut records = make_records(&[1.0, 2.0, 3.0]);
        records.swap(1, 2);
        let err = PriceSeries::new(records).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::NotChronological {
                index: 2,
                previous: date(3),
                date: date(2),
            }
        );
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let records = vec![
            PriceRecord::from_close(date(1), 1.0),
            PriceRecord::from_close(date(1), 2.0),
        ];
        assert!(matches!(
            PriceSeries::new(records),
            Err(InvalidInput::NotChronological { index: 1, .. })
        ));
    }

    #[test]
    fn new_rejects_non_finite_close() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let records = make_records(&[1.0, 2.0, bad, 4.0]);
            assert_eq!(
                PriceSeries::new(records),
                Err(InvalidInput::NonFiniteClose {
                    index: 2,
                    date: date(3),
                })
            );
        }
    }

    #[test]
    fn first_last_and_range() {
        let series = PriceSeries::new(make_records(&[10.0, 20.0, 30.0])).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.first().close, 10.0);
        assert_eq!(series.last().close, 30.0);
        assert_eq!(series.date_range(), (date(1), date(3)));
    }

    #[test]
    fn slice_is_inclusive_and_clamped() {
        let series = PriceSeries::new(make_records(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();

        let mid = series.slice(1, 3).unwrap();
        assert_eq!(mid.len(), 3);
        assert_eq!(mid.first().close, 2.0);
        assert_eq!(mid.last().close, 4.0);

        let tail = series.slice(3, 99).unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.last().close, 5.0);
    }

    #[test]
    fn slice_rejects_bad_bounds() {
        let series = PriceSeries::new(make_records(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(
            series.slice(2, 1),
            Err(InvalidInput::InvalidRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert!(series.slice(3, 5).is_err());
    }

    #[test]
    fn between_filters_by_date() {
        let series = PriceSeries::new(make_records(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        let sub = series.between(date(2), date(3)).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.date_range(), (date(2), date(3)));
    }

    #[test]
    fn between_with_no_overlap_is_empty_series() {
        let series = PriceSeries::new(make_records(&[1.0, 2.0])).unwrap();
        assert_eq!(
            series.between(date(10), date(20)),
            Err(InvalidInput::EmptySeries)
        );
    }
}
