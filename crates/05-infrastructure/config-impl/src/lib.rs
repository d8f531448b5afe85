//! # Configuration Implementation
//!
//! 构造配置源的具体实现。
//!
//! ## 主要组件
//!
//! - [`MemoryConfigSource`] - 内存配置源
//! - [`FileConfigSource`] - JSON / TOML / YAML 文件配置源
//! - [`configure_from`] - 加载配置源并写入注册表

pub mod loader;
pub mod providers;

pub use loader::*;
pub use providers::*;
