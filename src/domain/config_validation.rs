//! Configuration validation.
//!
//! Validates config fields before a backtest runs.

use crate::domain::error::EquityError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), EquityError> {
    validate_data_path(config)?;
    validate_window_size(config)?;
    validate_dates(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), EquityError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(EquityError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_window_size(config: &dyn ConfigPort) -> Result<(), EquityError> {
    match config.get_int_opt("backtest", "window_size") {
        None => Ok(()),
        Some(Ok(value)) if value > 0 => Ok(()),
        Some(Ok(_)) => Err(EquityError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "window_size".to_string(),
            reason: "window_size must be positive".to_string(),
        }),
        Some(Err(raw)) => Err(EquityError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "window_size".to_string(),
            reason: format!("'{}' is not an integer", raw),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), EquityError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;
    check_date_order(start, end)
}

/// Reject a start date after the end date. Also applied after command-line
/// overrides are merged over the config file.
pub fn check_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), EquityError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(EquityError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must not be after end_date".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Parse an optional `[backtest]` date key.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    field: &str,
) -> Result<Option<NaiveDate>, EquityError> {
    match config.get_string("backtest", field) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| EquityError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }),
    }
}
