//! 构造配置源实现

use async_trait::async_trait;
use config_abstractions::{ConfigSource, ConfigSourceKind};
use infrastructure_common::{ConfigError, ConfigResult, ConfigTable};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 内存配置源
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    table: ConfigTable,
}

impl MemoryConfigSource {
    /// 创建新的内存配置源
    pub fn new(table: ConfigTable) -> Self {
        Self { table }
    }

    /// 从 JSON 值创建，顶层必须是实例名到配置记录的映射
    pub fn from_json(value: Value) -> ConfigResult<Self> {
        if !value.is_object() {
            return Err(ConfigError::invalid_structure("顶层必须是实例名到构造配置的映射"));
        }

        let table = serde_json::from_value(value)
            .map_err(|e| ConfigError::invalid_structure(e.to_string()))?;
        Ok(Self { table })
    }
}

#[async_trait]
impl ConfigSource for MemoryConfigSource {
    async fn load(&self) -> Result<ConfigTable, ConfigError> {
        Ok(self.table.clone())
    }

    fn name(&self) -> &str {
        "MemoryConfigSource"
    }

    fn kind(&self) -> ConfigSourceKind {
        ConfigSourceKind::Memory
    }
}

/// 文件配置源
///
/// 根据扩展名选择 JSON、TOML 或 YAML 解析
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    file_path: PathBuf,
    kind: ConfigSourceKind,
}

impl FileConfigSource {
    /// 创建新的文件配置源
    pub fn new<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let file_path = path.as_ref().to_path_buf();
        let kind = ConfigSourceKind::from_path(&file_path).ok_or_else(|| {
            ConfigError::UnsupportedFormat {
                path: file_path.display().to_string(),
            }
        })?;

        Ok(Self { file_path, kind })
    }

    /// 忽略扩展名，显式指定格式
    pub fn with_kind(mut self, kind: ConfigSourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// 获取文件路径
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn parse(&self, content: &str) -> ConfigResult<ConfigTable> {
        let path = self.file_path.display().to_string();
        match self.kind {
            ConfigSourceKind::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::parse_error(path, e))
            }
            ConfigSourceKind::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e))
            }
            ConfigSourceKind::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::parse_error(path, e))
            }
            ConfigSourceKind::Memory => Err(ConfigError::UnsupportedFormat { path }),
        }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn load(&self) -> Result<ConfigTable, ConfigError> {
        debug!("加载构造配置文件: {}", self.file_path.display());

        let content = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound {
                    path: self.file_path.display().to_string(),
                })
            }
            Err(e) => return Err(ConfigError::FileReadError { source: e }),
        };

        let table = self.parse(&content)?;
        debug!("构造配置文件加载完成: {} 条", table.len());
        Ok(table)
    }

    fn name(&self) -> &str {
        "FileConfigSource"
    }

    fn kind(&self) -> ConfigSourceKind {
        self.kind
    }
}
