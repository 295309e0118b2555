//! 运行时层统一错误定义
//!
//! 处理器返回的失败最终都折叠为 `RuntimeError`，由引擎在派发边界
//! 统一上报；运行时自身不做任何重试。
//!
use thiserror::Error;
use usvc_events::EventError;

/// 统一错误类型（运行时最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("event handler error: {reason}")]
    Handler { reason: String },
    #[error("event queue error: {reason}")]
    Queue { reason: String },
    #[error("event writer error: writer={writer}, reason={reason}")]
    Writer { writer: String, reason: String },
}

/// 统一 Result 类型别名
pub type RuntimeResult<T> = Result<T, RuntimeError>;

// 允许处理器内部直接使用 `?` 把协作者错误折叠进 RuntimeError

impl From<EventError> for RuntimeError {
    fn from(err: EventError) -> Self {
        match err {
            e @ (EventError::QueueEmpty | EventError::Queue { .. }) => RuntimeError::Queue {
                reason: e.to_string(),
            },
            EventError::Writer { writer, reason } => RuntimeError::Writer { writer, reason },
            other => RuntimeError::Handler {
                reason: other.to_string(),
            },
        }
    }
}
