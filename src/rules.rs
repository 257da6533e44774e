//! 字段契约与模型注册表
//! 以（模型, 字段）为键注册脱敏/翻译规则；另支持字段名正则模式规则，
//! 用于未显式注册契约的字段（嵌套对象只走模式规则）

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::strategy::{MaskStrategy, TranslateStrategy};

/// 脱敏契约：strategy 与 handler 二选一，handler 非空时优先
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskRule {
    #[serde(default)]
    pub strategy: MaskStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl MaskRule {
    pub fn strategy(strategy: MaskStrategy) -> Self {
        Self {
            strategy,
            handler: None,
        }
    }

    pub fn handler(id: impl Into<String>) -> Self {
        Self {
            strategy: MaskStrategy::Default,
            handler: Some(id.into()),
        }
    }
}

/// 翻译契约：结构与脱敏契约一致，结果类型可能是布尔
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRule {
    #[serde(default)]
    pub strategy: TranslateStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl TranslateRule {
    pub fn strategy(strategy: TranslateStrategy) -> Self {
        Self {
            strategy,
            handler: None,
        }
    }

    pub fn handler(id: impl Into<String>) -> Self {
        Self {
            strategy: TranslateStrategy::Default,
            handler: Some(id.into()),
        }
    }
}

/// 字段规则：两种独立契约
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    Mask(MaskRule),
    Translate(TranslateRule),
}

/// 模式规则：按字段名正则匹配
struct PatternRule {
    field_name: Regex,
    rule: FieldRule,
}

/// 模型规则注册表
///
/// 注册在模型装配阶段完成一次，序列化期间只读
pub struct SchemaRegistry {
    exact: RwLock<HashMap<String, HashMap<String, FieldRule>>>,
    patterns: RwLock<Vec<PatternRule>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            exact: RwLock::new(HashMap::new()),
            patterns: RwLock::new(Vec::new()),
        }
    }

    /// 注册单个字段契约；同一（模型, 字段）重复注册时后注册者覆盖
    pub fn register_field(
        &self,
        model: impl Into<String>,
        field: impl Into<String>,
        rule: FieldRule,
    ) {
        self.exact
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(model.into())
            .or_default()
            .insert(field.into(), rule);
    }

    /// 注册字段名模式规则；按注册顺序匹配，先命中者生效
    pub fn register_pattern(&self, field_name: Regex, rule: FieldRule) {
        self.patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PatternRule { field_name, rule });
    }

    /// 精确查询字段契约
    pub fn lookup_exact(&self, model: &str, field: &str) -> Option<FieldRule> {
        self.exact
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(model)
            .and_then(|fields| fields.get(field))
            .cloned()
    }

    /// 仅按模式规则查询
    pub fn lookup_pattern(&self, field: &str) -> Option<FieldRule> {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.field_name.is_match(field))
            .map(|p| p.rule.clone())
    }

    /// 查询字段契约：精确契约优先，其次模式规则
    pub fn lookup(&self, model: &str, field: &str) -> Option<FieldRule> {
        self.lookup_exact(model, field)
            .or_else(|| self.lookup_pattern(field))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 模型注册构建器：一次声明一个模型的全部字段契约
pub struct ModelSchema {
    model: String,
    fields: Vec<(String, FieldRule)>,
}

impl ModelSchema {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: Vec::new(),
        }
    }

    pub fn mask(mut self, field: impl Into<String>, strategy: MaskStrategy) -> Self {
        self.fields
            .push((field.into(), FieldRule::Mask(MaskRule::strategy(strategy))));
        self
    }

    pub fn mask_handler(mut self, field: impl Into<String>, id: impl Into<String>) -> Self {
        self.fields
            .push((field.into(), FieldRule::Mask(MaskRule::handler(id))));
        self
    }

    pub fn translate(mut self, field: impl Into<String>, strategy: TranslateStrategy) -> Self {
        self.fields.push((
            field.into(),
            FieldRule::Translate(TranslateRule::strategy(strategy)),
        ));
        self
    }

    pub fn translate_handler(mut self, field: impl Into<String>, id: impl Into<String>) -> Self {
        self.fields
            .push((field.into(), FieldRule::Translate(TranslateRule::handler(id))));
        self
    }

    pub fn register(self, registry: &SchemaRegistry) {
        for (field, rule) in self.fields {
            registry.register_field(self.model.clone(), field, rule);
        }
    }
}
