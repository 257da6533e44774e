//! 内置转换策略
//! 脱敏策略输出始终为文本，翻译策略输出为文本或布尔

pub mod mask;
pub mod translate;

pub use mask::MaskStrategy;
pub use translate::{TranslateStrategy, TranslatedValue};
