use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_yaml::from_reader;
use tracing::{debug, info, instrument};

use crate::error::MeterError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MeterConfig {
    pub classes: usize,
    #[serde(default)]
    pub normalized: bool,
    #[serde(rename = "log-dir")]
    pub log_dir: Option<String>,
    #[serde(rename = "has-headers", default = "default_has_headers")]
    pub has_headers: bool,
}

fn default_has_headers() -> bool {
    true
}

const DEFAULT_DATA: &str = r#"
classes: 2
normalized: false
log-dir: "logs"
has-headers: true
"#;

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            classes: 2,
            normalized: false,
            log_dir: Some("logs".to_string()),
            has_headers: true,
        }
    }
}

impl MeterConfig {
    /// Reads the configuration from a YAML file.
    ///
    /// If the file does not exist, it creates a default configuration file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Optional path to the configuration file, `config.yml` if `None`.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MeterConfig` on success or a `MeterError` on failure.
    #[instrument(level = "info", skip(filename))]
    pub fn read_config<P: AsRef<Path>>(filename: Option<P>) -> Result<Self, MeterError> {
        let path = filename
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(|| Path::new("config.yml").to_path_buf());

        info!(path = %path.display(), "Reading configuration");

        if !path.exists() {
            info!(
                "Config file does not exist. Creating default config at {}",
                path.display()
            );
            let mut file = File::create(&path)?;
            file.write_all(DEFAULT_DATA.as_bytes())?;
            debug!("Default configuration file created");
            return Ok(MeterConfig::default());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let config: Self = from_reader(reader)?;
        config.validate()?;
        info!(
            classes = config.classes,
            normalized = config.normalized,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), MeterError> {
        if self.classes == 0 {
            return Err(MeterError::ConfigurationError(
                "classes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
