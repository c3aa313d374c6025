use crate::catalog::MetricId;
use crate::error::ConfigError;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

// CSV ingestion settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub trim_whitespace: bool, // Trim fields before parsing (accepts "1.5, 2.5" and CRLF files)
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            trim_whitespace: true,
        }
    }
}

// What an evaluation report contains and how it is printed
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub metrics: Vec<MetricId>, // Metrics in report order
    pub precision: usize,       // Decimals shown per value
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            metrics: MetricId::ALL.to_vec(),
            precision: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_metric: MetricId, // Used when a caller names no metric
    pub csv: CsvConfig,
    pub report: ReportConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_metric: MetricId::Rmse,
            csv: CsvConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl EngineConfig {
    // Missing keys fall back to their defaults
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&toml_str)?;
        info!("loaded engine config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.csv.trim_whitespace);
        assert_eq!(config.report.metrics.len(), 9);
        assert_eq!(config.report.precision, 4);
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_metric = "kling"

            [report]
            metrics = ["mse", "meanbias", "kendalltau"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_metric, MetricId::Kling);
        assert_eq!(
            config.report.metrics,
            vec![MetricId::Mse, MetricId::MeanBias, MetricId::KendallTau]
        );
        assert_eq!(config.report.precision, 4);
        assert!(config.csv.trim_whitespace);
    }

    #[test]
    fn unknown_metric_names_are_config_errors() {
        let err = EngineConfig::from_toml_str(r#"default_metric = "nse""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[csv]\ntrim_whitespace = false").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(!config.csv.trim_whitespace);

        let missing = EngineConfig::from_file("/nonexistent/gof.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
