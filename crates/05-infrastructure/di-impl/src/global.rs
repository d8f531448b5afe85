//! 进程级默认注册表
//!
//! 为无法直接持有注册表的调用方提供薄的转发函数。
//! 需要隔离状态的代码应当显式持有自己的 [`Registry`]。

use crate::Registry;
use di_abstractions::{Instance, InstanceRegistry, ResolveRequest};
use infrastructure_common::RegistryResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::info;

/// 全局注册表
static GLOBAL_REGISTRY: Lazy<RwLock<Arc<Registry>>> =
    Lazy::new(|| RwLock::new(Arc::new(Registry::new())));

/// 获取全局注册表
pub fn global_registry() -> Arc<Registry> {
    GLOBAL_REGISTRY.read().clone()
}

/// 替换全局注册表，返回之前的注册表
pub fn set_global_registry(registry: Arc<Registry>) -> Arc<Registry> {
    info!("替换全局注册表");
    std::mem::replace(&mut *GLOBAL_REGISTRY.write(), registry)
}

/// 通过全局注册表获取或创建实例
pub fn resolve(request: impl Into<ResolveRequest>) -> RegistryResult<Instance> {
    global_registry().resolve(request.into())
}

/// 通过全局注册表获取或创建实例并转换为具体类型
pub fn resolve_as<T>(request: impl Into<ResolveRequest>) -> RegistryResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    global_registry().resolve_as(request.into())
}
