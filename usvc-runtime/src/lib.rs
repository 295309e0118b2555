//! 事件驱动微服务运行时基座（usvc-runtime）
//!
//! 提供所有微服务共用的事件消费骨架：
//! - 处理器扩展点（`handler`）：服务方注入的单事件处理逻辑；
//! - 生命周期状态（`state`）：Running → StopRequested → Stopped 的单向流转；
//! - 服务引擎（`engine`）：从入站队列取事件并按派发策略调用处理器，
//!   暴露按目标名索引的出站写者与可调的轮询间隔。
//!
//! 典型用法：
//! 1. 实现 `EventHandler`，在 `handle_event` 中按 `event_type` 分派领域逻辑；
//! 2. 准备 `EventQueue` 与 `WriterRegistry` 协作者（见 usvc-events）；
//! 3. 调用 `ServiceEngine::start` —— 注意构造即启动后台消费；
//! 4. 结束时调用 `stop()`。
//!
pub mod engine;
pub mod error;
pub mod handler;
pub mod state;

pub use engine::{
    DEFAULT_POLL_INTERVAL, DispatchMode, EngineConfig, MIN_POLL_INTERVAL, ServiceEngine,
};
pub use error::{RuntimeError, RuntimeResult};
pub use handler::EventHandler;
pub use state::RunState;
