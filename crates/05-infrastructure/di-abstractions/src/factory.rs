//! 类型构造工厂抽象
//!
//! 以类型名称为键的构造函数表，替代运行时反射或代码生成

use infrastructure_common::{BoxError, RegistryError, RegistryResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// 注册表中保存的共享实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 普通构造函数类型
pub type ConstructorFn =
    Arc<dyn Fn(&ConstructorArgs) -> Result<Instance, BoxError> + Send + Sync>;

/// 静态初始化器（具名工厂方法）类型
pub type InitializerFn = ConstructorFn;

/// 独立可调用对象类型，调用时不接收参数
pub type CallableFn = Arc<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>;

/// 规范化后的构造参数
///
/// 具名参数保留插入顺序，按位置访问时依次对应。
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorArgs {
    /// 按位置排列的参数
    Positional(Vec<Value>),
    /// 具名参数
    Named(Map<String, Value>),
}

impl Default for ConstructorArgs {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

impl ConstructorArgs {
    /// 从原始参数规范化
    ///
    /// 缺省或 `null` 得到空参数列表；数组为位置参数；对象为具名参数；
    /// 其他标量包装为单元素位置参数。
    pub fn from_params(params: Option<Value>) -> Self {
        match params {
            None | Some(Value::Null) => Self::default(),
            Some(Value::Array(values)) => Self::Positional(values),
            Some(Value::Object(map)) => Self::Named(map),
            Some(scalar) => Self::Positional(vec![scalar]),
        }
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(map) => map.len(),
        }
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否为具名参数
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// 按位置获取参数值
    pub fn value(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Positional(values) => values.get(index),
            Self::Named(map) => map.values().nth(index),
        }
    }

    /// 按名称获取参数值，位置参数没有名称
    pub fn named_value(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Positional(_) => None,
            Self::Named(map) => map.get(name),
        }
    }

    /// 按位置迭代所有参数值
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Self::Positional(values) => Box::new(values.iter()),
            Self::Named(map) => Box::new(map.values()),
        }
    }

    /// 获取参数并转换为指定类型
    ///
    /// 具名参数优先按名称查找，找不到时退回到位置。
    pub fn argument<T: DeserializeOwned>(&self, index: usize, name: &str) -> RegistryResult<T> {
        self.optional(index, name)?.ok_or_else(|| {
            RegistryError::invalid_argument(format!("缺少参数 #{} ({})", index, name))
        })
    }

    /// 获取可选参数
    pub fn optional<T: DeserializeOwned>(
        &self,
        index: usize,
        name: &str,
    ) -> RegistryResult<Option<T>> {
        let value = self.named_value(name).or_else(|| self.value(index));
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                RegistryError::invalid_argument(format!(
                    "参数 #{} ({}) 类型转换失败: {}",
                    index, name, e
                ))
            }),
        }
    }

    /// 将全部参数绑定到具体类型
    ///
    /// 具名参数绑定为结构体，位置参数绑定为元组或序列。
    pub fn bind<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        let value = match self {
            Self::Positional(values) => Value::Array(values.clone()),
            Self::Named(map) => Value::Object(map.clone()),
        };

        serde_json::from_value(value)
            .map_err(|e| RegistryError::invalid_argument(format!("参数绑定失败: {}", e)))
    }
}

/// 类型构造注册信息
///
/// 一个类型可以有一个普通构造函数和任意多个具名静态初始化器
#[derive(Clone)]
pub struct TypeRegistration {
    /// 类型名称
    pub type_name: String,
    /// 普通构造函数
    pub constructor: Option<ConstructorFn>,
    /// 具名静态初始化器
    pub initializers: HashMap<String, InitializerFn>,
}

impl std::fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut initializers: Vec<&String> = self.initializers.keys().collect();
        initializers.sort();

        f.debug_struct("TypeRegistration")
            .field("type_name", &self.type_name)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .field("initializers", &initializers)
            .finish()
    }
}

impl TypeRegistration {
    /// 创建新的类型注册信息
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constructor: None,
            initializers: HashMap::new(),
        }
    }

    /// 以 Rust 类型的短名称创建注册信息
    pub fn for_type<T: 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        let short_name = full_name.rsplit("::").next().unwrap_or(full_name);
        Self::new(short_name)
    }

    /// 设置普通构造函数
    pub fn with_constructor<T, F>(mut self, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ConstructorArgs) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move |args: &ConstructorArgs| {
            constructor(args).map(|value| Arc::new(value) as Instance)
        }));
        self
    }

    /// 添加具名静态初始化器
    pub fn with_initializer<T, F>(mut self, name: impl Into<String>, initializer: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ConstructorArgs) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.initializers.insert(
            name.into(),
            Arc::new(move |args: &ConstructorArgs| {
                initializer(args).map(|value| Arc::new(value) as Instance)
            }),
        );
        self
    }

    /// 是否有普通构造函数
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// 查找具名初始化器
    pub fn initializer(&self, name: &str) -> Option<&InitializerFn> {
        self.initializers.get(name)
    }
}

/// 把返回具体类型的闭包包装为 [`CallableFn`]
pub fn callable<T, F>(callable: F) -> CallableFn
where
    T: Any + Send + Sync,
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
{
    Arc::new(move || callable().map(|value| Arc::new(value) as Instance))
}
