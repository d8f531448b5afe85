//! 错误类型定义

use thiserror::Error;

/// 装箱的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置源错误类型
///
/// 由外部配置加载器产生，注册表本身不会生成此类错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {path}, 原因: {source}")]
    ParseError { path: String, source: BoxError },

    #[error("不支持的配置格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置结构无效: {message}")]
    InvalidStructure { message: String },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse_error(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ParseError {
            path: path.into(),
            source: source.into(),
        }
    }

    /// 创建结构错误
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// 注册表错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("类型未注册: {type_name}")]
    TypeNotFound { type_name: String },

    #[error("无法创建对象: {type_name}, 没有可用的构造器或初始化器 {initializer:?}")]
    NoApplicableInitializer {
        type_name: String,
        initializer: Option<String>,
    },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ConstructionFailed { type_name: String, source: BoxError },

    #[error("构造参数无效: {message}")]
    InvalidArgument { message: String },

    #[error("实例类型不匹配: {instance_name}, 期望 {expected}")]
    TypeMismatch {
        instance_name: String,
        expected: &'static str,
    },

    #[error("未找到构造配置: {instance_name}")]
    ConfigNotFound { instance_name: String },

    #[error("构造配置无效: {instance_name}, 原因: {message}")]
    InvalidConfig {
        instance_name: String,
        message: String,
    },

    #[error("配置源加载失败: {source}")]
    ConfigSourceError {
        #[from]
        source: ConfigError,
    },
}

impl RegistryError {
    /// 创建类型未注册错误
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// 创建参数错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 包装构造器返回的错误
    pub fn construction_failed(type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// 是否为类型未注册错误
    pub fn is_type_not_found(&self) -> bool {
        matches!(self, Self::TypeNotFound { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_registry_error() {
        let err: RegistryError = ConfigError::FileNotFound {
            path: "missing.json".to_string(),
        }
        .into();

        assert!(matches!(err, RegistryError::ConfigSourceError { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_construction_failed_keeps_source_message() {
        let err = RegistryError::construction_failed("Connection", "refused");
        assert!(err.to_string().contains("Connection"));
        assert!(err.to_string().contains("refused"));
        assert!(!err.is_type_not_found());
    }
}
