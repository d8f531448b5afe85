//! 注册表构建器

use crate::Registry;
use di_abstractions::{CallableFn, Instance, InstanceRegistry, RegistryOptions, TypeRegistration};
use infrastructure_common::{ConfigTable, ConstructionConfig};
use std::any::Any;
use std::sync::Arc;
use tracing::info;

/// 注册表构建器
///
/// 在启动时集中注册类型、可调用对象、构造配置和预构造实例
#[derive(Default)]
pub struct RegistryBuilder {
    options: RegistryOptions,
    types: Vec<TypeRegistration>,
    callables: Vec<(String, CallableFn)>,
    configs: ConfigTable,
    instances: Vec<(String, Instance)>,
}

impl RegistryBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置注册表配置
    pub fn with_options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// 设置是否采用构造配置中的初始化器
    pub fn honor_configured_initializer(mut self, honor: bool) -> Self {
        self.options.honor_configured_initializer = honor;
        self
    }

    /// 注册类型
    pub fn register_type(mut self, registration: TypeRegistration) -> Self {
        self.types.push(registration);
        self
    }

    /// 注册独立可调用对象
    pub fn register_callable(mut self, name: impl Into<String>, callable: CallableFn) -> Self {
        self.callables.push((name.into(), callable));
        self
    }

    /// 添加单条构造配置
    pub fn configure(
        mut self,
        instance_name: impl Into<String>,
        config: ConstructionConfig,
    ) -> Self {
        self.configs.insert(instance_name.into(), config);
        self
    }

    /// 批量添加构造配置
    pub fn configure_all(mut self, configs: ConfigTable) -> Self {
        self.configs.extend(configs);
        self
    }

    /// 注册预构造实例
    pub fn register_instance<T>(mut self, instance_name: impl Into<String>, instance: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.instances.push((instance_name.into(), Arc::new(instance)));
        self
    }

    /// 构建注册表
    pub fn build(self) -> Registry {
        let registry = Registry::with_options(self.options);

        for registration in self.types {
            registry.register_type(registration);
        }
        for (name, callable) in self.callables {
            registry.register_callable(name, callable);
        }
        if !self.configs.is_empty() {
            registry.configure(self.configs);
        }
        for (name, instance) in self.instances {
            registry.register(&name, instance);
        }

        info!("构建注册表完成: {:?}", registry.stats());
        registry
    }
}
