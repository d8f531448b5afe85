//! 实例注册表抽象接口

use crate::factory::Instance;
use crate::resolver::ResolveRequest;
use infrastructure_common::{ConfigTable, RegistryError, RegistryResult};
use std::any::Any;
use std::sync::Arc;

/// 实例注册表 trait
///
/// 提供实例的 get-or-create、预注册和构造配置加载
pub trait InstanceRegistry: Send + Sync {
    /// 获取或创建实例
    ///
    /// 不做循环检测：构造函数解析自身实例名会无限递归直至栈溢出。
    fn resolve(&self, request: ResolveRequest) -> RegistryResult<Instance>;

    /// 注册已构造的实例，覆盖同名的已有实例
    fn register(&self, instance_name: &str, instance: Instance);

    /// 批量加载构造配置，覆盖同名的已有配置
    fn configure(&self, configs: ConfigTable);

    /// 检查实例是否已缓存
    fn is_cached(&self, instance_name: &str) -> bool;

    /// 检查是否存在构造配置
    fn is_configured(&self, instance_name: &str) -> bool;

    /// 检查类型是否已注册
    fn has_type(&self, type_name: &str) -> bool;

    /// 按类型名称获取共享实例
    fn get(&self, type_name: &str) -> RegistryResult<Instance> {
        self.resolve(ResolveRequest::new(type_name))
    }

    /// 获取或创建实例并转换为具体类型
    fn resolve_as<T>(&self, request: ResolveRequest) -> RegistryResult<Arc<T>>
    where
        T: Any + Send + Sync,
        Self: Sized,
    {
        let instance_name = request.instance_key().to_string();
        downcast_instance(self.resolve(request)?, instance_name)
    }

    /// 注册具体类型的实例
    fn register_instance<T>(&self, instance_name: &str, instance: T)
    where
        T: Any + Send + Sync,
        Self: Sized,
    {
        self.register(instance_name, Arc::new(instance));
    }
}

/// 将共享实例转换为具体类型
pub fn downcast_instance<T>(
    instance: Instance,
    instance_name: impl Into<String>,
) -> RegistryResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    instance.downcast::<T>().map_err(|_| RegistryError::TypeMismatch {
        instance_name: instance_name.into(),
        expected: std::any::type_name::<T>(),
    })
}
