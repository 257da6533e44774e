//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 脱敏引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// 总开关：关闭后所有字段原样输出
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 处理器降级时是否输出 warn 日志
    #[serde(default = "default_audit_fallbacks")]
    pub audit_fallbacks: bool,
    /// 值过滤适配器是否递归处理嵌套对象
    #[serde(default = "default_deep")]
    pub deep: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_audit_fallbacks() -> bool {
    true
}

fn default_deep() -> bool {
    true
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            audit_fallbacks: default_audit_fallbacks(),
            deep: default_deep(),
        }
    }
}

impl MaskingConfig {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            enabled: env_bool("IRONMASK_ENABLED", default_enabled()),
            audit_fallbacks: env_bool("IRONMASK_AUDIT_FALLBACKS", default_audit_fallbacks()),
            deep: env_bool("IRONMASK_DEEP", default_deep()),
        }
    }

    /// 从 TOML 配置文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"),
        Err(_) => default,
    }
}
