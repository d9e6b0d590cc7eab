//! INI file configuration adapter.
//!
//! Integer keys are read strictly so validation can tell a missing key from a
//! malformed one.

use crate::domain::error::EquityError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EquityError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| EquityError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int_opt(&self, section: &str, key: &str) -> Option<Result<i64, String>> {
        match self.config.getint(section, key) {
            Ok(value) => value.map(Ok),
            Err(_) => self.get_string(section, key).map(Err),
        }
    }
}
