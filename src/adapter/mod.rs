//! 序列化集成适配器
//! 绑定式适配器对接流式序列化（serde Serializer），
//! 值过滤适配器对接整对象文档（serde_json Value）；
//! 两者共用引擎的同一转换入口

pub mod contextual;
pub mod filter;

pub use contextual::{BoundFieldAdapter, FieldMeta, FieldWrite};
pub use filter::ValueFilter;
