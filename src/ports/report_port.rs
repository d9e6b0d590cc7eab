//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::EquityError;
use std::io::Write;
use std::path::Path;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn render(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), EquityError>;

    /// Default implementation: renders into a newly created file at `path`.
    fn write(&self, result: &BacktestResult, path: &Path) -> Result<(), EquityError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        self.render(result, &mut file)
    }
}
