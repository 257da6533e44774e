//! 日志系统配置模块
//! 支持结构化日志与日志级别配置，供宿主应用或测试初始化

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// 初始化日志系统
///
/// `level` 为默认过滤表达式，可被 `RUST_LOG` 环境变量覆盖；
/// `json` 为 true 时输出结构化 JSON 日志
pub fn init_logging(level: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer())
            .try_init()?;
    }

    Ok(())
}
