pub mod context;
pub mod toml_config;

use crate::adapters::resource::{default_resource_dirs, DEFAULT_RESOURCE_NAME};
use crate::config::context::ExecutionMode;
#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MAX_PARTITIONS: usize = 1024;

/// 命令列參數；不帶任何參數即執行預設工作
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "wordcount")]
#[command(about = "Count word occurrences in a text file and save them to an output directory")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Read this file instead of the bundled spark_example.txt
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Execution mode: local, local[N] or local[*]
    #[arg(long)]
    pub master: Option<String>,

    #[arg(long)]
    pub app_name: Option<String>,

    /// Output line format: tuple, tsv or json
    #[arg(long)]
    pub format: Option<String>,

    /// Number of part files to write
    #[arg(long)]
    pub partitions: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-stage timing and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// 一次執行所用的完整配置，於管線開始前解析一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub app_name: String,
    pub master: String,
    pub resource_name: String,
    pub resource_dirs: Vec<PathBuf>,
    pub input: Option<String>,
    pub output_path: String,
    pub output_format: OutputFormat,
    pub partitions: usize,
    pub monitor: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            app_name: "Wordcount".to_string(),
            master: "local".to_string(),
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
            resource_dirs: default_resource_dirs(),
            input: None,
            output_path: "output".to_string(),
            output_format: OutputFormat::Tuple,
            partitions: 1,
            monitor: false,
        }
    }
}

impl RunConfig {
    /// 預設值 <- TOML 檔 <- 命令列
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = RunConfig::default();

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(input) = &cli.input {
            config.input = Some(input.clone());
        }
        if let Some(output_path) = &cli.output_path {
            config.output_path = output_path.clone();
        }
        if let Some(master) = &cli.master {
            config.master = master.clone();
        }
        if let Some(app_name) = &cli.app_name {
            config.app_name = app_name.clone();
        }
        if let Some(format) = &cli.format {
            config.output_format = format.parse()?;
        }
        if let Some(partitions) = cli.partitions {
            config.partitions = partitions;
        }
        config.monitor |= cli.monitor;

        config.validate()?;
        tracing::debug!("⚙️ Execution mode: {}", config.execution_mode()?);
        Ok(config)
    }

    pub fn execution_mode(&self) -> Result<ExecutionMode> {
        ExecutionMode::parse(&self.master)
    }

    pub fn parallelism(&self) -> usize {
        self.execution_mode()
            .map(|mode| mode.parallelism())
            .unwrap_or(1)
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("app_name", &self.app_name)?;
        self.execution_mode()?;
        validation::validate_resource_name("resource_name", &self.resource_name)?;
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("partitions", self.partitions, 1, MAX_PARTITIONS)?;
        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn parallelism(&self) -> usize {
        RunConfig::parallelism(self)
    }

    fn resource_name(&self) -> &str {
        &self.resource_name
    }

    fn resource_dirs(&self) -> &[PathBuf] {
        &self.resource_dirs
    }

    fn input_override(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn partitions(&self) -> usize {
        self.partitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app_name, "Wordcount");
        assert_eq!(config.parallelism(), 1);
        assert_eq!(config.resource_name, "spark_example.txt");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = RunConfig::default();
        config.partitions = 0;
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.master = "yarn".to_string();
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.output_path = String::new();
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.app_name = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_no_arguments_gives_defaults() {
        let cli = CliConfig::parse_from(["wordcount"]);
        let config = RunConfig::from_cli(&cli).unwrap();

        assert_eq!(config.output_path, "output");
        assert_eq!(config.output_format, OutputFormat::Tuple);
        assert_eq!(config.master, "local");
        assert!(config.input.is_none());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "wordcount",
            "--master",
            "local[2]",
            "--format",
            "tsv",
            "--partitions",
            "3",
            "--output-path",
            "counts",
        ]);
        let config = RunConfig::from_cli(&cli).unwrap();

        assert_eq!(config.parallelism(), 2);
        assert_eq!(config.output_format, OutputFormat::Tsv);
        assert_eq!(config.partitions, 3);
        assert_eq!(config.output_path, "counts");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "[output]\npath = \"from-file\"\npartitions = 2\n",
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_string_lossy().to_string()),
            partitions: Some(5),
            ..CliConfig::default()
        };
        let config = RunConfig::from_cli(&cli).unwrap();

        assert_eq!(config.output_path, "from-file");
        assert_eq!(config.partitions, 5);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_unknown_format() {
        let cli = CliConfig {
            format: Some("xml".to_string()),
            ..CliConfig::default()
        };
        assert!(RunConfig::from_cli(&cli).is_err());
    }
}
