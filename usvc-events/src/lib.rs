//! 事件模型与协作者协议（usvc-events）
//!
//! 为事件驱动的微服务运行时提供最小必要的数据模型与边界协议：
//! - 事件信封（`event`）：类型判别符 + 不透明负载；
//! - 入站队列协议（`queue`）：多生产者/单消费者的 FIFO 抽象；
//! - 出站写者协议（`writer`）：按目标名索引的事件发送通道；
//! - 各协议配套的内存实现，用于测试、示例与本地开发。
//!
//! 本 crate 不绑定任何消息传输实现，具体后端（如 Kafka）由上层
//! 提供实现并注入。
//!
pub mod error;
pub mod event;
pub mod queue;
pub mod queue_inmemory;
pub mod writer;
pub mod writer_inmemory;

pub use error::{EventError, EventResult};
pub use event::Event;
pub use queue::EventQueue;
pub use queue_inmemory::InMemoryEventQueue;
pub use writer::{EventWriter, WriterRegistry};
pub use writer_inmemory::InMemoryEventWriter;
