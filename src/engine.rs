//! 字段转换引擎
//! 两种序列化适配器共用同一转换入口，行为一致由构造保证；
//! 处理器失败在这里统一降级为原值，策略本身不会失败

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::MaskingConfig;
use crate::handler::HandlerRegistry;
use crate::rules::{FieldRule, SchemaRegistry};
use crate::strategy::TranslatedValue;

/// 统一转换结果
///
/// 适配器按变体写出：`Text` 写字符串，`Bool` 写布尔字面量，`Null` 写 null
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformedValue {
    Null,
    Text(String),
    Bool(bool),
}

/// 转换引擎：规则表 + 处理器注册表 + 配置
///
/// 引擎是显式持有、可注入的对象，生命周期由宿主应用决定；
/// `global()` 提供进程级默认实例作为便捷入口
pub struct MaskEngine {
    schemas: SchemaRegistry,
    handlers: HandlerRegistry,
    config: MaskingConfig,
}

impl MaskEngine {
    pub fn new(config: MaskingConfig) -> Self {
        Self {
            schemas: SchemaRegistry::new(),
            handlers: HandlerRegistry::new(),
            config,
        }
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }

    /// 应用字段契约，产出统一转换结果
    ///
    /// 总开关关闭时原样透传；null 输入始终产出 null
    pub fn transform(&self, rule: &FieldRule, raw: Option<&str>) -> TransformedValue {
        let Some(value) = raw else {
            return TransformedValue::Null;
        };
        if !self.config.enabled {
            return TransformedValue::Text(value.to_string());
        }

        match rule {
            FieldRule::Mask(mask) => {
                // handler 非空时优先于 strategy
                if let Some(id) = &mask.handler {
                    return TransformedValue::Text(self.invoke_mask(id, value));
                }
                match mask.strategy.apply(value) {
                    Some(text) => TransformedValue::Text(text),
                    None => TransformedValue::Null,
                }
            }
            FieldRule::Translate(translate) => {
                let out = if let Some(id) = &translate.handler {
                    self.invoke_translate(id, value)
                } else {
                    translate.strategy.apply(value)
                };
                match out {
                    TranslatedValue::Text(text) => TransformedValue::Text(text),
                    TranslatedValue::Bool(flag) => TransformedValue::Bool(flag),
                }
            }
        }
    }

    /// 调用脱敏处理器；任何失败降级为原值文本
    fn invoke_mask(&self, id: &str, value: &str) -> String {
        match self.handlers.try_invoke_mask(id, value) {
            Ok(out) => out,
            Err(err) => {
                if self.config.audit_fallbacks {
                    tracing::warn!(handler = %id, error = %err, "mask handler failed, falling back to original value");
                }
                value.to_string()
            }
        }
    }

    /// 调用翻译处理器；任何失败降级为原值文本
    fn invoke_translate(&self, id: &str, value: &str) -> TranslatedValue {
        match self.handlers.try_invoke_translate(id, value) {
            Ok(out) => out,
            Err(err) => {
                if self.config.audit_fallbacks {
                    tracing::warn!(handler = %id, error = %err, "translate handler failed, falling back to original value");
                }
                TranslatedValue::Text(value.to_string())
            }
        }
    }
}

impl Default for MaskEngine {
    fn default() -> Self {
        Self::new(MaskingConfig::default())
    }
}

static GLOBAL: Lazy<Arc<MaskEngine>> = Lazy::new(|| Arc::new(MaskEngine::default()));

/// 进程级默认引擎
pub fn global() -> Arc<MaskEngine> {
    Arc::clone(&GLOBAL)
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::handler::MaskHandler;
    use crate::rules::{MaskRule, TranslateRule};
    use crate::strategy::{MaskStrategy, TranslateStrategy};

    #[test]
    fn test_mask_strategy_dispatch() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Mask(MaskRule::strategy(MaskStrategy::Phone));

        assert_eq!(
            engine.transform(&rule, Some("13812345678")),
            TransformedValue::Text("138****5678".to_string())
        );
    }

    #[test]
    fn test_null_input_stays_null() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Mask(MaskRule::strategy(MaskStrategy::Phone));
        assert_eq!(engine.transform(&rule, None), TransformedValue::Null);
    }

    #[test]
    fn test_clear_to_null_strategy() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Mask(MaskRule::strategy(MaskStrategy::ClearToNull));
        assert_eq!(engine.transform(&rule, Some("secret")), TransformedValue::Null);
    }

    #[test]
    fn test_translate_bool_branch() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Translate(TranslateRule::strategy(TranslateStrategy::Switch));
        assert_eq!(engine.transform(&rule, Some("1")), TransformedValue::Bool(true));
    }

    #[test]
    fn test_translate_text_branch() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Translate(TranslateRule::strategy(TranslateStrategy::Whether));
        assert_eq!(
            engine.transform(&rule, Some("1")),
            TransformedValue::Text("是".to_string())
        );
    }

    #[test]
    fn test_handler_failure_falls_back() {
        struct AlwaysErr;
        impl MaskHandler for AlwaysErr {
            fn handler(&self, _value: &str) -> anyhow::Result<String> {
                Err(anyhow!("boom"))
            }
        }

        let engine = MaskEngine::default();
        engine.handlers().register_mask("demo.Err", || Ok(Box::new(AlwaysErr)));

        let rule = FieldRule::Mask(MaskRule::handler("demo.Err"));
        assert_eq!(
            engine.transform(&rule, Some("original")),
            TransformedValue::Text("original".to_string())
        );
    }

    #[test]
    fn test_missing_handler_falls_back() {
        let engine = MaskEngine::default();
        let rule = FieldRule::Mask(MaskRule::handler("not.Registered"));
        assert_eq!(
            engine.transform(&rule, Some("x")),
            TransformedValue::Text("x".to_string())
        );
    }

    #[test]
    fn test_disabled_engine_passthrough() {
        let engine = MaskEngine::new(MaskingConfig {
            enabled: false,
            ..MaskingConfig::default()
        });
        let rule = FieldRule::Mask(MaskRule::strategy(MaskStrategy::Phone));
        assert_eq!(
            engine.transform(&rule, Some("13812345678")),
            TransformedValue::Text("13812345678".to_string())
        );
    }
}
