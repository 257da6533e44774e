//! 全对象值过滤适配器
//! 对每个对象实例的每个字段独立查询契约并转换，不保存任何跨调用状态；
//! 仅 null 与文本值参与转换，其余 JSON 类型原样透传

use std::sync::Arc;

use serde_json::Value;

use crate::engine::{MaskEngine, TransformedValue};

/// 值过滤适配器
pub struct ValueFilter {
    engine: Arc<MaskEngine>,
}

impl ValueFilter {
    pub fn new(engine: Arc<MaskEngine>) -> Self {
        Self { engine }
    }

    /// 处理单个（模型, 字段名, 原始值）三元组
    ///
    /// 每次调用都重新查询契约；无契约或非文本值时原样返回
    pub fn process(&self, model: &str, field: &str, value: Value) -> Value {
        let raw = match &value {
            Value::Null => None,
            Value::String(s) => Some(s.as_str()),
            // 脱敏只作用于文本字段
            _ => return value,
        };

        let Some(rule) = self.engine.schemas().lookup(model, field) else {
            return value;
        };

        match self.engine.transform(&rule, raw) {
            TransformedValue::Null => Value::Null,
            TransformedValue::Text(text) => Value::String(text),
            TransformedValue::Bool(flag) => Value::Bool(flag),
        }
    }

    /// 就地处理整个对象树
    ///
    /// 顶层对象按模型名匹配精确契约；嵌套对象与数组元素只走字段名模式规则
    pub fn apply(&self, model: &str, root: &mut Value) {
        match root {
            Value::Object(map) => {
                for (field, value) in map.iter_mut() {
                    match value {
                        Value::Object(_) | Value::Array(_) => {
                            if self.engine.config().deep {
                                self.apply_nested(value);
                            }
                        }
                        _ => {
                            let owned = std::mem::take(value);
                            *value = self.process(model, field, owned);
                        }
                    }
                }
            }
            // 顶层是数组时，每个元素视为同一模型的实例
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.apply(model, item);
                }
            }
            _ => {}
        }
    }

    /// 序列化任意对象并处理后返回文档
    pub fn render<T: serde::Serialize>(&self, model: &str, value: &T) -> serde_json::Result<Value> {
        let mut doc = serde_json::to_value(value)?;
        self.apply(model, &mut doc);
        Ok(doc)
    }

    /// 嵌套层：无模型上下文，仅模式规则生效
    fn apply_nested(&self, node: &mut Value) {
        match node {
            Value::Object(map) => {
                for (field, value) in map.iter_mut() {
                    match value {
                        Value::Object(_) | Value::Array(_) => self.apply_nested(value),
                        _ => {
                            let owned = std::mem::take(value);
                            *value = self.process_pattern(field, owned);
                        }
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.apply_nested(item);
                }
            }
            _ => {}
        }
    }

    fn process_pattern(&self, field: &str, value: Value) -> Value {
        let raw = match &value {
            Value::Null => None,
            Value::String(s) => Some(s.as_str()),
            _ => return value,
        };

        let Some(rule) = self.engine.schemas().lookup_pattern(field) else {
            return value;
        };

        match self.engine.transform(&rule, raw) {
            TransformedValue::Null => Value::Null,
            TransformedValue::Text(text) => Value::String(text),
            TransformedValue::Bool(flag) => Value::Bool(flag),
        }
    }
}
