//! 从配置源加载构造配置到注册表

use config_abstractions::ConfigSource;
use di_abstractions::InstanceRegistry;
use infrastructure_common::RegistryResult;
use tracing::{info, warn};

/// 加载配置源并写入注册表，返回加载的配置条数
///
/// 加载失败时注册表保持不变，错误以 `ConfigSourceError` 返回
pub async fn configure_from(
    registry: &dyn InstanceRegistry,
    source: &dyn ConfigSource,
) -> RegistryResult<usize> {
    let table = source.load().await.map_err(|e| {
        warn!("配置源 {} 加载失败: {}", source.name(), e);
        e
    })?;

    let count = table.len();
    registry.configure(table);
    info!("从配置源 {} 加载了 {} 条构造配置", source.name(), count);

    Ok(count)
}
