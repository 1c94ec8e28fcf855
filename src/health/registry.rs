//! 检测器注册表
//!
//! 根据检测器类型标识查找可执行的检测器

use crate::error::ConfigError;
use crate::health::checker::{Checker, ProbeSettings};
use crate::health::content::HttpContentChecker;
use crate::health::observer::{ProbeObserver, TracingObserver};
use crate::health::status::HttpStatusChecker;
use crate::health::timeout::TimeoutResolver;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 检测器注册表
#[derive(Clone)]
pub struct CheckerRegistry {
    checkers: BTreeMap<String, Arc<dyn Checker>>,
}

impl CheckerRegistry {
    /// 创建空注册表
    pub fn empty() -> Self {
        Self {
            checkers: BTreeMap::new(),
        }
    }

    /// 创建包含内置HTTP检测器的注册表
    ///
    /// # 参数
    /// * `settings` - HTTP检测器公共设置
    /// * `observer` - 诊断观察者
    pub fn new(settings: ProbeSettings, observer: Arc<dyn ProbeObserver>) -> Self {
        let timeouts = TimeoutResolver::new(observer);
        let mut registry = Self::empty();

        registry.register(Arc::new(HttpStatusChecker::new(
            timeouts.clone(),
            settings.clone(),
        )));
        registry.register(Arc::new(HttpContentChecker::new(timeouts, settings)));

        registry
    }

    /// 注册检测器，同类型的已有检测器会被替换
    pub fn register(&mut self, checker: Arc<dyn Checker>) {
        self.checkers.insert(checker.kind().to_string(), checker);
    }

    /// 查找检测器
    ///
    /// # 参数
    /// * `kind` - 检测器类型标识
    ///
    /// # 返回
    /// * `Result<Arc<dyn Checker>, ConfigError>` - 检测器，未知类型返回 `UnsupportedChecker`
    pub fn resolve(&self, kind: &str) -> Result<Arc<dyn Checker>, ConfigError> {
        self.checkers
            .get(kind)
            .cloned()
            .ok_or_else(|| ConfigError::UnsupportedChecker {
                kind: kind.to_string(),
            })
    }

    /// 是否支持该检测器类型
    pub fn is_supported(&self, kind: &str) -> bool {
        self.checkers.contains_key(kind)
    }

    /// 已注册的检测器类型
    pub fn supported_kinds(&self) -> Vec<&str> {
        self.checkers.keys().map(String::as_str).collect()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new(ProbeSettings::default(), Arc::new(TracingObserver))
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("kinds", &self.supported_kinds())
            .finish()
    }
}
