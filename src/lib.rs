//! IronMask - 序列化字段脱敏与翻译引擎
//!
//! 声明式字段契约：内置策略或自定义处理器二选一；
//! 绑定式与值过滤两种序列化适配器共用同一转换核心，输出保证一致

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod logging;
pub mod rules;
pub mod strategy;

// 重新导出常用类型
pub use engine::{global, MaskEngine, TransformedValue};
pub use error::TransformError;

// 统一模块导出
pub mod prelude {
    pub use crate::{
        adapter::{BoundFieldAdapter, FieldMeta, FieldWrite, ValueFilter},
        config::MaskingConfig,
        engine::{global, MaskEngine, TransformedValue},
        error::TransformError,
        handler::{HandlerRegistry, MaskHandler, TranslateHandler},
        rules::{FieldRule, MaskRule, ModelSchema, SchemaRegistry, TranslateRule},
        strategy::{MaskStrategy, TranslateStrategy, TranslatedValue},
    };
}
