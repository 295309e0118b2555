//! 事件层统一错误定义
//!
//! 覆盖队列取出、写者发送与负载序列化的最小必要集合，
//! 便于各传输实现统一转换为 `EventError`。
//!
use thiserror::Error;

/// 统一错误类型（事件层最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    // --- 队列 ---
    #[error("event queue is empty")]
    QueueEmpty,
    #[error("event queue error: {reason}")]
    Queue { reason: String },

    // --- 写者 ---
    #[error("event writer error: writer={writer}, reason={reason}")]
    Writer { writer: String, reason: String },

    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;
