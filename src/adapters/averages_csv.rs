//! `date,avg` CSV writer for overlaying averages on a price chart.

use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::EquityError;
use crate::domain::moving_average::AveragePoint;
use std::io::Write;

pub fn write_averages<W: Write>(averages: &[AveragePoint], out: W) -> Result<(), EquityError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["date", "avg"]).map_err(csv_error)?;
    for point in averages {
        wtr.write_record([
            point.date.format(DATE_FORMAT).to_string(),
            point.avg.to_string(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> EquityError {
    EquityError::Io(std::io::Error::other(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_rows() {
        let averages = vec![
            AveragePoint {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                avg: 101.0,
            },
            AveragePoint {
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                avg: 102.0,
            },
        ];
        let mut buf = Vec::new();
        write_averages(&averages, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,avg\n2024-03-01,101\n2024-03-04,102\n"
        );
    }

    #[test]
    fn empty_averages_write_header_only() {
        let mut buf = Vec::new();
        write_averages(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "date,avg\n");
    }
}
