//! # Infrastructure Common
//!
//! 这个 crate 提供了命名实例注册表的公共类型和错误定义。
//!
//! ## 核心类型
//!
//! - [`ConstructionConfig`] - 构造配置记录
//! - [`ConfigTable`] - 实例名到构造配置的映射
//! - [`RegistryError`] - 注册表错误类型
//! - [`ConfigError`] - 配置源错误类型
//!
//! ## 设计原则
//!
//! - 配置记录在加载时不做形状校验，错误延迟到构造时暴露
//! - 构造失败通过显式的错误通道返回，从不与合法返回值混淆

pub mod configuration;
pub mod errors;

pub use configuration::*;
pub use errors::*;
