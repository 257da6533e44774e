//! 绑定式序列化适配器
//! 每个声明了契约的字段位置绑定一次，之后每次写值复用已解析的规则；
//! 绑定后不可变，可安全跨线程共享

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::engine::{MaskEngine, TransformedValue};
use crate::rules::FieldRule;

/// 字段位置元信息，由序列化端在绑定时提供
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta<'a> {
    pub model: &'a str,
    pub field: &'a str,
}

impl<'a> FieldMeta<'a> {
    pub fn new(model: &'a str, field: &'a str) -> Self {
        Self { model, field }
    }
}

/// 绑定到单个字段位置的适配器
///
/// 序列化端应为每个字段位置构造一次并长期持有；
/// 未声明契约的字段得到未绑定适配器，写值时原样透传
pub struct BoundFieldAdapter {
    engine: Arc<MaskEngine>,
    rule: Option<FieldRule>,
}

impl BoundFieldAdapter {
    /// 绑定：查询一次字段契约并永久捕获
    pub fn bind(engine: Arc<MaskEngine>, meta: FieldMeta<'_>) -> Self {
        let rule = engine.schemas().lookup_exact(meta.model, meta.field);
        Self { engine, rule }
    }

    /// 未绑定适配器：用于没有契约的字段
    pub fn unbound(engine: Arc<MaskEngine>) -> Self {
        Self { engine, rule: None }
    }

    pub fn is_bound(&self) -> bool {
        self.rule.is_some()
    }

    /// 写出一个字段值；每次调用严格写出且仅写出一个值
    ///
    /// 写错误（序列化器自身的 `S::Error`）原样向上传播
    pub fn serialize_field<S>(&self, raw: Option<&str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.rule {
            None => match raw {
                Some(value) => serializer.serialize_str(value),
                None => serializer.serialize_none(),
            },
            Some(rule) => match self.engine.transform(rule, raw) {
                TransformedValue::Null => serializer.serialize_none(),
                TransformedValue::Text(text) => serializer.serialize_str(&text),
                TransformedValue::Bool(flag) => serializer.serialize_bool(flag),
            },
        }
    }
}

/// 单次写值请求：借用适配器与原始值
///
/// 在写出当前字段的序列化调用内创建并销毁，不跨调用保存
pub struct FieldWrite<'a> {
    adapter: &'a BoundFieldAdapter,
    raw: Option<&'a str>,
}

impl<'a> FieldWrite<'a> {
    pub fn new(adapter: &'a BoundFieldAdapter, raw: Option<&'a str>) -> Self {
        Self { adapter, raw }
    }
}

impl Serialize for FieldWrite<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.adapter.serialize_field(self.raw, serializer)
    }
}
