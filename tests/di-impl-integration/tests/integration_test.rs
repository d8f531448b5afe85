//! 注册表与配置源的端到端集成测试

use config_impl::{configure_from, FileConfigSource};
use di_abstractions::{callable, InstanceRegistry, ResolveRequest, TypeRegistration};
use di_impl::Registry;
use infrastructure_common::RegistryError;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 日志组件
#[derive(Debug)]
struct Logger {
    channel: String,
    level: String,
}

/// 连接管理组件
#[derive(Debug)]
struct ConnectionManager {
    host: String,
    port: u16,
}

fn build_registry(connections: Arc<AtomicUsize>) -> Registry {
    Registry::builder()
        .register_type(
            TypeRegistration::new("Logger")
                .with_constructor(|args| {
                    Ok(Logger {
                        channel: args.argument(0, "channel")?,
                        level: args.optional(1, "level")?.unwrap_or_else(|| "info".to_string()),
                    })
                })
                .with_initializer("quiet", |args| {
                    Ok(Logger {
                        channel: args.argument(0, "channel")?,
                        level: "error".to_string(),
                    })
                }),
        )
        .register_type(TypeRegistration::new("ConnectionManager").with_constructor(move |args| {
            connections.fetch_add(1, Ordering::SeqCst);
            Ok(ConnectionManager {
                host: args.argument(0, "host")?,
                port: args.optional(1, "port")?.unwrap_or(5432),
            })
        }))
        .register_callable("default_logger", callable(|| {
            Ok(Logger {
                channel: "default".to_string(),
                level: "warn".to_string(),
            })
        }))
        .build()
}

fn write_config(suffix: &str, content: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[tokio::test]
async fn test_file_configured_instances() -> anyhow::Result<()> {
    init_test_logger();
    let connections = Arc::new(AtomicUsize::new(0));
    let registry = build_registry(connections.clone());

    let file = write_config(
        ".json",
        r#"{
            "db": {"className": "ConnectionManager", "params": {"host": "localhost"}, "shared": true},
            "audit": {"typeName": "Logger", "params": ["audit", "debug"]},
            "silent": {"typeName": "Logger", "params": ["jobs"], "initFunction": "quiet"}
        }"#,
    )?;
    let loaded = configure_from(&registry, &FileConfigSource::new(file.path())?).await?;
    assert_eq!(loaded, 3);

    let db = registry.resolve_as::<ConnectionManager>(
        ResolveRequest::new("ConnectionManager").with_instance_name("db"),
    )?;
    let db_again = registry.resolve_as::<ConnectionManager>(
        ResolveRequest::new("ConnectionManager").with_instance_name("db"),
    )?;
    assert_eq!(db.host, "localhost");
    assert_eq!(db.port, 5432);
    assert!(Arc::ptr_eq(&db, &db_again));
    assert_eq!(connections.load(Ordering::SeqCst), 1);

    let audit = registry.resolve_as::<Logger>(ResolveRequest::new("Logger").with_instance_name("audit"))?;
    assert_eq!(audit.channel, "audit");
    assert_eq!(audit.level, "debug");

    let silent = registry.resolve_configured("silent")?.downcast::<Logger>().map_err(|_| {
        anyhow::anyhow!("silent 不是 Logger")
    })?;
    assert_eq!(silent.channel, "jobs");
    assert_eq!(silent.level, "error");

    Ok(())
}

#[tokio::test]
async fn test_yaml_config_with_callable_initializer() -> anyhow::Result<()> {
    init_test_logger();
    let registry = build_registry(Arc::new(AtomicUsize::new(0)));

    let file = write_config(
        ".yml",
        "fallback:\n  typeName: Logger\n  initializerName: default_logger\n",
    )?;
    configure_from(&registry, &FileConfigSource::new(file.path())?).await?;

    let logger = registry.resolve_as::<Logger>(ResolveRequest::new("Logger").with_instance_name("fallback"))?;

    assert_eq!(logger.channel, "default");
    assert_eq!(logger.level, "warn");
    Ok(())
}

#[tokio::test]
async fn test_test_double_replaces_configured_instance() -> anyhow::Result<()> {
    let connections = Arc::new(AtomicUsize::new(0));
    let registry = build_registry(connections.clone());
    let file = write_config(
        ".toml",
        "[db]\ntypeName = \"ConnectionManager\"\nparams = [\"prod.internal\", 6432]\n",
    )?;
    configure_from(&registry, &FileConfigSource::new(file.path())?).await?;

    registry.register_instance(
        "db",
        ConnectionManager {
            host: "fake".to_string(),
            port: 0,
        },
    );
    let db = registry.resolve_as::<ConnectionManager>(
        ResolveRequest::new("ConnectionManager").with_instance_name("db"),
    )?;

    assert_eq!(db.host, "fake");
    assert_eq!(connections.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_record_surfaces_at_resolve_time() -> anyhow::Result<()> {
    let registry = build_registry(Arc::new(AtomicUsize::new(0)));
    let file = write_config(".json", r#"{"db": {"typeName": "ConnectionManager", "params": [42]}}"#)?;

    configure_from(&registry, &FileConfigSource::new(file.path())?).await?;
    let err = registry
        .resolve(ResolveRequest::new("ConnectionManager").with_instance_name("db"))
        .unwrap_err();

    assert!(matches!(err, RegistryError::ConstructionFailed { .. }));
    assert!(!registry.is_cached("db"));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_tasks_share_one_instance() -> anyhow::Result<()> {
    let connections = Arc::new(AtomicUsize::new(0));
    let registry = Arc::new(build_registry(connections.clone()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let registry = registry.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            registry.resolve(
                ResolveRequest::new("ConnectionManager")
                    .with_params(serde_json::json!({"host": "localhost", "port": 1})),
            )
        }));
    }

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await??);
    }

    assert_eq!(connections.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    Ok(())
}

#[test]
fn test_global_function_passes_through() -> anyhow::Result<()> {
    let registry = Arc::new(build_registry(Arc::new(AtomicUsize::new(0))));
    di_impl::set_global_registry(registry.clone());

    let logger = di_impl::resolve_as::<Logger>(
        ResolveRequest::new("Logger").with_params(serde_json::json!("global")),
    )?;

    assert_eq!(logger.channel, "global");
    assert!(registry.is_cached("Logger"));
    assert!(di_impl::resolve("Missing").unwrap_err().is_type_not_found());
    Ok(())
}
