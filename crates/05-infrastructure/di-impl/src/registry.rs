//! 命名实例注册表

use chrono::{DateTime, Utc};
use di_abstractions::{
    CallableFn, ConstructorArgs, ConstructorFn, InitializerFn, Instance, InstanceRegistry,
    RegistryOptions, RegistryStats, ResolveRequest, TypeRegistration,
};
use infrastructure_common::{ConfigTable, ConstructionConfig, RegistryError, RegistryResult};
use parking_lot::{ReentrantMutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 缓存中的实例
#[derive(Clone)]
struct CachedInstance {
    instance: Instance,
    cached_at: DateTime<Utc>,
}

impl CachedInstance {
    fn new(instance: Instance) -> Self {
        Self {
            instance,
            cached_at: Utc::now(),
        }
    }
}

/// 选定的构造方式
enum Strategy {
    /// 普通构造函数
    Constructor(ConstructorFn),
    /// 类型的具名静态初始化器
    Initializer(InitializerFn),
    /// 独立可调用对象
    Callable(CallableFn),
}

/// 命名实例注册表
///
/// 持有实例缓存、构造配置表和类型构造表，所有表都由读写锁保护。
/// 共享实例的缓存未命中由按实例名划分的可重入锁串行化，保证同名实例只构造一次，
/// 不同实例名的构造互不阻塞；可重入使构造函数可以在同一线程内再次解析。
pub struct Registry {
    /// 注册表配置
    options: RegistryOptions,
    /// 实例缓存
    instances: RwLock<HashMap<String, CachedInstance>>,
    /// 构造配置表
    configs: RwLock<ConfigTable>,
    /// 类型构造表
    types: RwLock<HashMap<String, TypeRegistration>>,
    /// 独立可调用对象表
    callables: RwLock<HashMap<String, CallableFn>>,
    /// 按实例名划分的共享实例构造锁
    construction_locks: RwLock<HashMap<String, Arc<ReentrantMutex<()>>>>,
    cache_hits: AtomicU64,
    constructions: AtomicU64,
    construction_failures: AtomicU64,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("options", &self.options)
            .field("cached_instances", &self.cached_names())
            .field("configured_instances", &self.configured_names())
            .field("registered_types", &self.registered_types())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// 使用指定配置创建注册表
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            instances: RwLock::new(HashMap::new()),
            configs: RwLock::new(HashMap::new()),
            types: RwLock::new(HashMap::new()),
            callables: RwLock::new(HashMap::new()),
            construction_locks: RwLock::new(HashMap::new()),
            cache_hits: AtomicU64::new(0),
            constructions: AtomicU64::new(0),
            construction_failures: AtomicU64::new(0),
        }
    }

    /// 创建构建器
    pub fn builder() -> crate::RegistryBuilder {
        crate::RegistryBuilder::new()
    }

    /// 获取注册表配置
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// 注册类型构造信息，覆盖同名类型
    pub fn register_type(&self, registration: TypeRegistration) {
        info!("注册类型: {}", registration.type_name);
        self.types
            .write()
            .insert(registration.type_name.clone(), registration);
    }

    /// 注册独立可调用对象，可作为任意类型的初始化器
    pub fn register_callable(&self, name: impl Into<String>, callable: CallableFn) {
        let name = name.into();
        info!("注册可调用对象: {}", name);
        self.callables.write().insert(name, callable);
    }

    /// 按构造配置中记录的类型解析实例
    ///
    /// 与 [`InstanceRegistry::resolve`] 不同，类型名称、共享标志和初始化器
    /// 都取自配置
    pub fn resolve_configured(&self, instance_name: &str) -> RegistryResult<Instance> {
        let config = self
            .config(instance_name)
            .ok_or_else(|| RegistryError::ConfigNotFound {
                instance_name: instance_name.to_string(),
            })?;

        let type_name = config.type_name.ok_or_else(|| RegistryError::InvalidConfig {
            instance_name: instance_name.to_string(),
            message: "缺少类型名称".to_string(),
        })?;

        let mut request = ResolveRequest::new(type_name)
            .with_instance_name(instance_name)
            .shared(config.shared.unwrap_or(true));
        if let Some(initializer) = config.initializer {
            request = request.with_initializer(initializer);
        }

        self.resolve(request)
    }

    /// 获取构造配置
    pub fn config(&self, instance_name: &str) -> Option<ConstructionConfig> {
        self.configs.read().get(instance_name).cloned()
    }

    /// 获取实例缓存时间
    pub fn cached_at(&self, instance_name: &str) -> Option<DateTime<Utc>> {
        self.instances
            .read()
            .get(instance_name)
            .map(|cached| cached.cached_at)
    }

    /// 已缓存的实例名称
    pub fn cached_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// 已配置的实例名称
    pub fn configured_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.configs.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// 已注册的类型名称
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// 获取统计信息
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            cached_instances: self.instances.read().len(),
            configured_instances: self.configs.read().len(),
            registered_types: self.types.read().len(),
            registered_callables: self.callables.read().len(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            constructions: self.constructions.load(Ordering::Relaxed),
            construction_failures: self.construction_failures.load(Ordering::Relaxed),
        }
    }

    /// 获取实例名对应的构造锁，不存在时创建
    fn construction_lock(&self, instance_name: &str) -> Arc<ReentrantMutex<()>> {
        if let Some(lock) = self.construction_locks.read().get(instance_name) {
            return lock.clone();
        }

        self.construction_locks
            .write()
            .entry(instance_name.to_string())
            .or_insert_with(|| Arc::new(ReentrantMutex::new(())))
            .clone()
    }

    fn cached(&self, instance_name: &str) -> Option<Instance> {
        let instance = self
            .instances
            .read()
            .get(instance_name)
            .map(|cached| cached.instance.clone())?;

        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        debug!("命中实例缓存: {}", instance_name);
        Some(instance)
    }

    /// 参数缺省时从构造配置补全参数和初始化器
    fn apply_config(
        &self,
        instance_name: &str,
        params: Option<Value>,
        initializer: Option<String>,
    ) -> (Option<Value>, Option<String>) {
        if !matches!(params, None | Some(Value::Null)) {
            return (params, initializer);
        }

        let configs = self.configs.read();
        let Some(config) = configs.get(instance_name) else {
            return (params, initializer);
        };

        debug!("使用构造配置: {}", instance_name);
        let initializer = match initializer {
            Some(initializer) => Some(initializer),
            None if self.options.honor_configured_initializer => config.initializer.clone(),
            None => None,
        };

        (config.params.clone(), initializer)
    }

    fn build(
        &self,
        type_name: &str,
        instance_name: &str,
        params: Option<Value>,
        initializer: Option<String>,
    ) -> RegistryResult<Instance> {
        let (params, initializer) = self.apply_config(instance_name, params, initializer);
        self.construct(type_name, params, initializer.as_deref())
    }

    fn construct(
        &self,
        type_name: &str,
        params: Option<Value>,
        initializer: Option<&str>,
    ) -> RegistryResult<Instance> {
        let result = self.select_strategy(type_name, initializer).and_then(|strategy| {
            let args = ConstructorArgs::from_params(params);
            let name = initializer.unwrap_or_default();

            let created = match strategy {
                Strategy::Constructor(constructor) => {
                    debug!("构造实例: {} (构造函数, {} 个参数)", type_name, args.len());
                    constructor(&args)
                }
                Strategy::Initializer(initializer) => {
                    debug!(
                        "构造实例: {} (初始化器 {}, {} 个参数)",
                        type_name,
                        name,
                        args.len()
                    );
                    initializer(&args)
                }
                Strategy::Callable(callable) => {
                    debug!("构造实例: {} (可调用对象 {}, 忽略参数)", type_name, name);
                    callable()
                }
            };

            created.map_err(|source| RegistryError::construction_failed(type_name, source))
        });

        match &result {
            Ok(_) => {
                self.constructions.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.construction_failures.fetch_add(1, Ordering::Relaxed);
                warn!("构造实例失败: {}", e);
            }
        }

        result
    }

    /// 选择构造方式，函数在锁外调用
    fn select_strategy(
        &self,
        type_name: &str,
        initializer: Option<&str>,
    ) -> RegistryResult<Strategy> {
        let types = self.types.read();
        let registration = types
            .get(type_name)
            .ok_or_else(|| RegistryError::type_not_found(type_name))?;

        let not_applicable = || RegistryError::NoApplicableInitializer {
            type_name: type_name.to_string(),
            initializer: initializer.map(str::to_string),
        };

        match initializer {
            None => registration
                .constructor
                .clone()
                .map(Strategy::Constructor)
                .ok_or_else(not_applicable),
            Some(name) => {
                if let Some(initializer) = registration.initializer(name) {
                    return Ok(Strategy::Initializer(initializer.clone()));
                }

                self.callables
                    .read()
                    .get(name)
                    .cloned()
                    .map(Strategy::Callable)
                    .ok_or_else(not_applicable)
            }
        }
    }
}

impl InstanceRegistry for Registry {
    fn resolve(&self, request: ResolveRequest) -> RegistryResult<Instance> {
        let ResolveRequest {
            type_name,
            params,
            instance_name,
            shared,
            initializer,
        } = request;
        let instance_name = instance_name.unwrap_or_else(|| type_name.clone());

        if !shared {
            return self.build(&type_name, &instance_name, params, initializer);
        }

        if let Some(instance) = self.cached(&instance_name) {
            return Ok(instance);
        }

        let lock = self.construction_lock(&instance_name);
        let _guard = lock.lock();
        if let Some(instance) = self.cached(&instance_name) {
            return Ok(instance);
        }

        let instance = self.build(&type_name, &instance_name, params, initializer)?;
        self.instances
            .write()
            .insert(instance_name.clone(), CachedInstance::new(instance.clone()));
        info!("缓存共享实例: {} ({})", instance_name, type_name);

        Ok(instance)
    }

    fn register(&self, instance_name: &str, instance: Instance) {
        info!("注册实例: {}", instance_name);
        self.instances
            .write()
            .insert(instance_name.to_string(), CachedInstance::new(instance));
    }

    fn configure(&self, configs: ConfigTable) {
        let count = configs.len();
        let mut table = self.configs.write();
        for (instance_name, config) in configs {
            table.insert(instance_name, config);
        }
        info!("加载构造配置: {} 条", count);
    }

    fn is_cached(&self, instance_name: &str) -> bool {
        self.instances.read().contains_key(instance_name)
    }

    fn is_configured(&self, instance_name: &str) -> bool {
        self.configs.read().contains_key(instance_name)
    }

    fn has_type(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }
}
