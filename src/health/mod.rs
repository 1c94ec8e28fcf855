//! 健康检测模块
//!
//! 提供检测器注册表、HTTP状态/内容检测器、超时解析和检测结果

pub mod checker;
pub mod content;
pub mod observer;
pub mod registry;
pub mod result;
pub mod status;
pub mod timeout;

// 重新导出主要类型
pub use checker::{Checker, ProbeSettings};
pub use content::{HttpContentChecker, HTTP_CONTENT};
pub use observer::{ProbeObserver, TracingObserver};
pub use registry::CheckerRegistry;
pub use result::{CheckReport, CheckResult};
pub use status::{HttpStatusChecker, HTTP_STATUS};
pub use timeout::{TimeoutResolver, DEFAULT_TIMEOUT};
