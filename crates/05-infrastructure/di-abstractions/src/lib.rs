//! # Instance Registry Abstractions
//!
//! 命名实例注册表的抽象层，定义实例解析、注册和构造的核心接口。
//!
//! ## 核心接口
//!
//! - [`InstanceRegistry`] - 实例注册表接口
//! - [`ResolveRequest`] - 实例解析请求
//! - [`TypeRegistration`] - 类型构造注册信息
//! - [`ConstructorArgs`] - 规范化后的构造参数

pub mod registry;
pub mod resolver;
pub mod factory;
pub mod container;

pub use registry::*;
pub use resolver::*;
pub use factory::*;
pub use container::*;
