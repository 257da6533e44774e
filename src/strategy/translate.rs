//! 内置翻译策略
//! 翻译结果可能是文本或布尔，适配器按运行时类型分别写出

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// 翻译结果：文本或布尔
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslatedValue {
    Text(String),
    Bool(bool),
}

/// 翻译策略（闭集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslateStrategy {
    /// 默认：原样输出文本
    Default,
    /// 开关值翻译为布尔字面量
    Switch,
    /// 开关值翻译为「是/否」文本
    Whether,
}

impl Default for TranslateStrategy {
    fn default() -> Self {
        Self::Default
    }
}

impl TranslateStrategy {
    /// 应用策略；空白输入原样返回文本
    pub fn apply(&self, value: &str) -> TranslatedValue {
        if value.trim().is_empty() {
            return TranslatedValue::Text(value.to_string());
        }

        match self {
            Self::Default => TranslatedValue::Text(value.to_string()),
            Self::Switch => match parse_switch(value) {
                Some(flag) => TranslatedValue::Bool(flag),
                // 无法识别的开关值原样输出，保持全函数语义
                None => TranslatedValue::Text(value.to_string()),
            },
            Self::Whether => match parse_switch(value) {
                Some(true) => TranslatedValue::Text("是".to_string()),
                _ => TranslatedValue::Text("否".to_string()),
            },
        }
    }
}

impl FromStr for TranslateStrategy {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "switch" => Ok(Self::Switch),
            "whether" => Ok(Self::Whether),
            other => Err(TransformError::UnknownStrategy(other.to_string())),
        }
    }
}

/// 识别常见开关文本
fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "是" => Some(true),
        "0" | "false" | "no" | "n" | "否" => Some(false),
        _ => None,
    }
}
