//! 内置脱敏策略
//! 所有策略均为全函数：任意输入（包括空白）都返回确定结果，绝不 panic

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// 脱敏策略（闭集，构建期确定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStrategy {
    /// 默认：原样输出
    Default,
    /// 通用标识符（保留前3后4）
    UserId,
    /// 手机号（保留前3后4）
    Phone,
    /// 邮箱（保留本地部分首字符与域名）
    Email,
    /// 身份证号（保留前6后4）
    IdCard,
    /// 银行卡号（保留前6后4）
    BankCard,
    /// 地址（保留前6个字符）
    Address,
    /// 丢弃原值，输出 null
    ClearToNull,
    /// 丢弃原值，输出空串
    ClearToEmpty,
}

impl Default for MaskStrategy {
    fn default() -> Self {
        Self::Default
    }
}

impl MaskStrategy {
    /// 应用策略；返回 `None` 表示输出 null
    ///
    /// 空白输入原样返回（Clear 系列除外，它们无条件丢弃原值）
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            Self::ClearToNull => return None,
            Self::ClearToEmpty => return Some(String::new()),
            _ => {}
        }

        if value.trim().is_empty() {
            return Some(value.to_string());
        }

        let masked = match self {
            Self::Default => value.to_string(),
            Self::UserId => keep_ends(value, 3, 4),
            Self::Phone => keep_ends(value, 3, 4),
            Self::Email => mask_email(value),
            Self::IdCard => keep_ends(value, 6, 4),
            Self::BankCard => keep_ends(value, 6, 4),
            Self::Address => keep_ends(value, 6, 0),
            Self::ClearToNull | Self::ClearToEmpty => unreachable!(),
        };
        Some(masked)
    }
}

impl FromStr for MaskStrategy {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "user_id" => Ok(Self::UserId),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "id_card" => Ok(Self::IdCard),
            "bank_card" => Ok(Self::BankCard),
            "address" => Ok(Self::Address),
            "clear_to_null" => Ok(Self::ClearToNull),
            "clear_to_empty" => Ok(Self::ClearToEmpty),
            other => Err(TransformError::UnknownStrategy(other.to_string())),
        }
    }
}

/// 保留前 `prefix` 与后 `suffix` 个字符，中间等长打码
///
/// 按字符而非字节处理，中文地址等多字节文本不会被截断；
/// 过短的输入全部打码
fn keep_ends(value: &str, prefix: usize, suffix: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= prefix + suffix {
        return "*".repeat(chars.len());
    }

    let mut out = String::with_capacity(value.len());
    out.extend(&chars[..prefix]);
    out.extend(std::iter::repeat('*').take(chars.len() - prefix - suffix));
    out.extend(&chars[chars.len() - suffix..]);
    out
}

/// 脱敏邮箱：保留本地部分首字符和完整域名
fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let local = &email[..at_pos];
        let domain = &email[at_pos..];

        if local.chars().count() <= 2 {
            format!("**{}", domain)
        } else {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***{}", first, domain)
        }
    } else {
        "***@***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_mask() {
        assert_eq!(
            MaskStrategy::Phone.apply("13812345678"),
            Some("138****5678".to_string())
        );
    }

    #[test]
    fn test_phone_mask_preserves_length() {
        let masked = MaskStrategy::Phone.apply("13812345678").unwrap();
        assert_eq!(masked.chars().count(), 11);
    }

    #[test]
    fn test_short_input_fully_masked() {
        assert_eq!(MaskStrategy::Phone.apply("1381234"), Some("*******".to_string()));
        assert_eq!(MaskStrategy::IdCard.apply("123"), Some("***".to_string()));
    }

    #[test]
    fn test_id_card_mask() {
        assert_eq!(
            MaskStrategy::IdCard.apply("110101199003071234"),
            Some("110101********1234".to_string())
        );
    }

    #[test]
    fn test_bank_card_mask() {
        assert_eq!(
            MaskStrategy::BankCard.apply("6222021234567890123"),
            Some("622202*********0123".to_string())
        );
    }

    #[test]
    fn test_email_mask() {
        assert_eq!(
            MaskStrategy::Email.apply("zhangsan@example.com"),
            Some("z***@example.com".to_string())
        );
        assert_eq!(
            MaskStrategy::Email.apply("ab@example.com"),
            Some("**@example.com".to_string())
        );
        assert_eq!(
            MaskStrategy::Email.apply("not-an-email"),
            Some("***@***".to_string())
        );
    }

    #[test]
    fn test_address_mask_multibyte() {
        let masked = MaskStrategy::Address.apply("浙江省杭州市西湖区文一西路969号").unwrap();
        assert!(masked.starts_with("浙江省杭州市"));
        assert!(!masked.contains("文一西路"));
        // 按字符等长打码
        assert_eq!(
            masked.chars().count(),
            "浙江省杭州市西湖区文一西路969号".chars().count()
        );
    }

    #[test]
    fn test_clear_strategies() {
        assert_eq!(MaskStrategy::ClearToNull.apply("anything"), None);
        assert_eq!(MaskStrategy::ClearToEmpty.apply("anything"), Some(String::new()));
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(
            MaskStrategy::Default.apply("任意输入 any input"),
            Some("任意输入 any input".to_string())
        );
    }

    #[test]
    fn test_blank_input_passthrough() {
        assert_eq!(MaskStrategy::Phone.apply(""), Some(String::new()));
        assert_eq!(MaskStrategy::Email.apply("  "), Some("  ".to_string()));
    }

    #[test]
    fn test_all_strategies_total() {
        // 任意畸形输入都不应 panic
        let inputs = ["", " ", "x", "中", "\u{0}\u{ffff}", "a@", "@b", "😀😀😀😀😀😀😀😀"];
        let strategies = [
            MaskStrategy::Default,
            MaskStrategy::UserId,
            MaskStrategy::Phone,
            MaskStrategy::Email,
            MaskStrategy::IdCard,
            MaskStrategy::BankCard,
            MaskStrategy::Address,
            MaskStrategy::ClearToNull,
            MaskStrategy::ClearToEmpty,
        ];
        for s in strategies {
            for input in inputs {
                let _ = s.apply(input);
            }
        }
    }

    #[test]
    fn test_parse_strategy_name() {
        assert_eq!("phone".parse::<MaskStrategy>().unwrap(), MaskStrategy::Phone);
        assert_eq!(
            "Bank_Card".parse::<MaskStrategy>().unwrap(),
            MaskStrategy::BankCard
        );
        assert!(matches!(
            "no_such".parse::<MaskStrategy>(),
            Err(TransformError::UnknownStrategy(_))
        ));
    }
}
