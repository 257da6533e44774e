//! 自定义处理器注册与缓存
//! 处理器按标识符显式注册工厂，首次调用时惰性构造，构造结果缓存为单实例；
//! 两个线程同时首次解析同一标识符时允许重复构造，但缓存表以先写入者为准，
//! 之后所有读取方观察到同一实例

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;

use crate::error::TransformError;
use crate::strategy::TranslatedValue;

/// 脱敏处理器契约：单个文本参数入，文本出
///
/// 实现必须无状态或自行保证线程安全，同一实例会被并发复用
pub trait MaskHandler: Send + Sync {
    fn handler(&self, value: &str) -> Result<String>;
}

/// 翻译处理器契约：单个文本参数入，文本或布尔出
pub trait TranslateHandler: Send + Sync {
    fn handler(&self, value: &str) -> Result<TranslatedValue>;
}

type MaskFactory = Box<dyn Fn() -> Result<Box<dyn MaskHandler>> + Send + Sync>;
type TranslateFactory = Box<dyn Fn() -> Result<Box<dyn TranslateHandler>> + Send + Sync>;

enum HandlerFactory {
    Mask(MaskFactory),
    Translate(TranslateFactory),
}

/// 已构造的处理器实例
#[derive(Clone)]
enum CachedHandler {
    Mask(Arc<dyn MaskHandler>),
    Translate(Arc<dyn TranslateHandler>),
}

/// 处理器注册表：工厂表 + 实例缓存
///
/// 实例由注册表独占持有，生命周期与注册表一致
pub struct HandlerRegistry {
    factories: RwLock<HashMap<String, HandlerFactory>>,
    instances: RwLock<HashMap<String, CachedHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 注册脱敏处理器工厂；同名注册覆盖旧工厂，已缓存实例不受影响
    pub fn register_mask<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn MaskHandler>> + Send + Sync + 'static,
    {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), HandlerFactory::Mask(Box::new(factory)));
    }

    /// 注册翻译处理器工厂
    pub fn register_translate<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn TranslateHandler>> + Send + Sync + 'static,
    {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), HandlerFactory::Translate(Box::new(factory)));
    }

    /// 严格调用脱敏处理器，不做降级；适合上线前的规则校验
    ///
    /// 常规序列化路径请走引擎层，失败会按降级策略替换为原值
    pub fn try_invoke_mask(&self, id: &str, value: &str) -> Result<String, TransformError> {
        match self.resolve(id)? {
            CachedHandler::Mask(h) => {
                h.handler(value)
                    .map_err(|cause| TransformError::HandlerInvocationFailure {
                        id: id.to_string(),
                        cause,
                    })
            }
            CachedHandler::Translate(_) => {
                Err(TransformError::HandlerContractViolation(id.to_string()))
            }
        }
    }

    /// 严格调用翻译处理器，不做降级
    pub fn try_invoke_translate(
        &self,
        id: &str,
        value: &str,
    ) -> Result<TranslatedValue, TransformError> {
        match self.resolve(id)? {
            CachedHandler::Translate(h) => {
                h.handler(value)
                    .map_err(|cause| TransformError::HandlerInvocationFailure {
                        id: id.to_string(),
                        cause,
                    })
            }
            CachedHandler::Mask(_) => {
                Err(TransformError::HandlerContractViolation(id.to_string()))
            }
        }
    }

    /// 查缓存，未命中则构造并写入
    fn resolve(&self, id: &str) -> Result<CachedHandler, TransformError> {
        if let Some(cached) = self
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Ok(cached.clone());
        }

        // 构造放在实例表写锁之外，工厂执行期间不阻塞其他字段的转换
        let built = {
            let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
            match factories.get(id) {
                None => return Err(TransformError::HandlerNotFound(id.to_string())),
                Some(HandlerFactory::Mask(f)) => CachedHandler::Mask(Arc::from(f().map_err(
                    |e| TransformError::HandlerNotFound(format!("{id}: construction failed: {e}")),
                )?)),
                Some(HandlerFactory::Translate(f)) => {
                    CachedHandler::Translate(Arc::from(f().map_err(|e| {
                        TransformError::HandlerNotFound(format!("{id}: construction failed: {e}"))
                    })?))
                }
            }
        };

        // 先写入者胜：并发首次解析可能重复构造，缓存表只保留最先写入的实例
        let mut instances = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = instances.entry(id.to_string()).or_insert(built);
        tracing::debug!(handler = %id, "handler instance cached");
        Ok(entry.clone())
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
