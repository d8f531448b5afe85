//! 构造配置源抽象接口

use async_trait::async_trait;
use infrastructure_common::{ConfigError, ConfigTable};
use std::path::Path;

/// 构造配置源 trait
///
/// 从某个外部资源加载实例名到构造配置的映射
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// 加载构造配置
    async fn load(&self) -> Result<ConfigTable, ConfigError>;

    /// 获取配置源名称
    fn name(&self) -> &str;

    /// 获取配置源格式
    fn kind(&self) -> ConfigSourceKind;
}

/// 配置源格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSourceKind {
    /// 内存映射
    Memory,
    /// JSON 文件
    Json,
    /// TOML 文件
    Toml,
    /// YAML 文件
    Yaml,
}

impl ConfigSourceKind {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}
