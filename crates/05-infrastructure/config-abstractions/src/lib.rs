//! # Configuration Abstractions
//!
//! 构造配置来源的抽象层。配置的加载和解析由配置源负责，
//! 注册表只接收已经解析好的 [`ConfigTable`](infrastructure_common::ConfigTable)。
//!
//! ## 核心接口
//!
//! - [`ConfigSource`] - 构造配置源接口
//! - [`ConfigSourceKind`] - 配置源格式

pub mod provider;

pub use provider::*;
