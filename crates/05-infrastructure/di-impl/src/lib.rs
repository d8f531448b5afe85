//! # 实例注册表具体实现
//!
//! 提供命名实例的 get-or-create 注册表、构建器，以及进程级默认注册表。
//!
//! ```ignore
//! use di_abstractions::{InstanceRegistry, ResolveRequest, TypeRegistration};
//! use di_impl::Registry;
//!
//! let registry = Registry::builder()
//!     .register_type(TypeRegistration::new("Greeter").with_constructor(|args| {
//!         Ok(format!("hello {}", args.argument::<String>(0, "name")?))
//!     }))
//!     .build();
//!
//! let greeter = registry.resolve_as::<String>(
//!     ResolveRequest::new("Greeter").with_params(serde_json::json!(["world"])),
//! )?;
//! ```

mod builder;
mod global;
mod registry;

pub use builder::RegistryBuilder;
pub use global::{global_registry, resolve, resolve_as, set_global_registry};
pub use registry::Registry;
