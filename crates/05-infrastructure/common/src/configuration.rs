//! 构造配置记录定义

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 实例名到构造配置的映射
pub type ConfigTable = HashMap<String, ConstructionConfig>;

/// 构造配置
///
/// 描述如何在调用方不提供参数的情况下构造某个实例。
/// 所有字段都是可选的，加载时不做校验，问题在解析实例时才会暴露。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// 要构造的类型名称
    #[serde(alias = "typeName", alias = "className")]
    pub type_name: Option<String>,
    /// 构造参数：单值、有序列表或具名映射
    pub params: Option<Value>,
    /// 实例名称（仅作说明，键以映射中的名称为准）
    #[serde(alias = "instanceName")]
    pub instance_name: Option<String>,
    /// 是否共享（缓存）实例
    #[serde(alias = "cacheRequested")]
    pub shared: Option<bool>,
    /// 初始化器名称：类型的静态工厂或独立的可调用对象
    #[serde(alias = "initializerName", alias = "initFunction")]
    pub initializer: Option<String>,
}

impl ConstructionConfig {
    /// 创建指定类型的构造配置
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// 设置构造参数
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// 设置实例名称
    pub fn with_instance_name(mut self, instance_name: impl Into<String>) -> Self {
        self.instance_name = Some(instance_name.into());
        self
    }

    /// 设置是否共享
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = Some(shared);
        self
    }

    /// 设置初始化器
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}
