//! 实例解析请求
//!
//! 描述一次 get-or-create 调用的全部输入

use serde_json::Value;

/// 实例解析请求
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    /// 要构造的类型名称
    pub type_name: String,
    /// 显式构造参数，缺省时回退到构造配置
    pub params: Option<Value>,
    /// 缓存和配置使用的实例名称，缺省为类型名称
    pub instance_name: Option<String>,
    /// 是否共享（缓存）实例
    pub shared: bool,
    /// 初始化器名称
    pub initializer: Option<String>,
}

impl ResolveRequest {
    /// 创建新的解析请求，默认共享实例
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            params: None,
            instance_name: None,
            shared: true,
            initializer: None,
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
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// 每次都创建新实例，且不写入缓存
    pub fn transient(self) -> Self {
        self.shared(false)
    }

    /// 设置初始化器
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    /// 缓存和配置的键
    pub fn instance_key(&self) -> &str {
        self.instance_name.as_deref().unwrap_or(&self.type_name)
    }
}

impl From<&str> for ResolveRequest {
    fn from(type_name: &str) -> Self {
        Self::new(type_name)
    }
}

impl From<String> for ResolveRequest {
    fn from(type_name: String) -> Self {
        Self::new(type_name)
    }
}
