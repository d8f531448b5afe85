//! 注册表配置与统计信息

/// 注册表配置
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// 参数来自构造配置时，是否同时采用配置中的初始化器
    pub honor_configured_initializer: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            honor_configured_initializer: true,
        }
    }
}

/// 注册表统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// 已缓存实例数量
    pub cached_instances: usize,
    /// 构造配置数量
    pub configured_instances: usize,
    /// 已注册类型数量
    pub registered_types: usize,
    /// 已注册独立可调用对象数量
    pub registered_callables: usize,
    /// 缓存命中次数
    pub cache_hits: u64,
    /// 成功构造次数
    pub constructions: u64,
    /// 构造失败次数
    pub construction_failures: u64,
}
