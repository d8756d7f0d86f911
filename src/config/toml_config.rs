use crate::config::RunConfig;
use crate::domain::model::OutputFormat;
use crate::utils::error::{Result, WordCountError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    pub app_name: Option<String>,
    pub master: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub resource: Option<String>,
    pub resource_dirs: Option<Vec<PathBuf>>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: Option<OutputFormat>,
    pub partitions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| WordCountError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WordCountError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| WordCountError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到既有配置上，只覆蓋檔案中有寫的欄位
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(app_name) = &self.context.app_name {
            config.app_name = app_name.clone();
        }
        if let Some(master) = &self.context.master {
            config.master = master.clone();
        }
        if let Some(resource) = &self.input.resource {
            config.resource_name = resource.clone();
        }
        if let Some(dirs) = &self.input.resource_dirs {
            config.resource_dirs = dirs.clone();
        }
        if let Some(path) = &self.input.path {
            config.input = Some(path.clone());
        }
        if let Some(path) = &self.output.path {
            config.output_path = path.clone();
        }
        if let Some(format) = self.output.format {
            config.output_format = format;
        }
        if let Some(partitions) = self.output.partitions {
            config.partitions = partitions;
        }
        if let Some(monitoring) = &self.monitoring {
            config.monitor = monitoring.enabled;
        }
    }
}
