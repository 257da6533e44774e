//! 错误类型定义
//! 策略/处理器相关的失败统一在引擎内部降级处理，
//! 只有序列化器自身的写错误会原样向上传播

use thiserror::Error;

/// 字段转换过程中的错误分类
#[derive(Debug, Error)]
pub enum TransformError {
    /// 未知策略名（仅在解析配置文本中的策略名时可达）
    #[error("unknown strategy name: {0}")]
    UnknownStrategy(String),

    /// 处理器未注册或构造失败
    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    /// 处理器按另一种契约注册（脱敏/翻译类型不匹配）
    #[error("handler contract violation: {0} is registered under a different kind")]
    HandlerContractViolation(String),

    /// 处理器执行失败
    #[error("handler invocation failed: {id}: {cause}")]
    HandlerInvocationFailure { id: String, cause: anyhow::Error },
}
